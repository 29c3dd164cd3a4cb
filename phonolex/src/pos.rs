//! Penn Treebank part-of-speech tags, lowercase as stored in the lexicon.
use crate::error::QueryError;

/// Every recognised tag with a short description.
pub const PENN_TAGS: &[(&str, &str)] = &[
    ("cc", "coordinating conjunction"),
    ("cd", "cardinal number"),
    ("dt", "determiner"),
    ("ex", "existential there"),
    ("fw", "foreign word"),
    ("in", "preposition or subordinating conjunction"),
    ("jj", "adjective"),
    ("jjr", "adjective, comparative"),
    ("jjs", "adjective, superlative"),
    ("ls", "list item marker"),
    ("md", "modal"),
    ("nn", "noun, singular or mass"),
    ("nns", "noun, plural"),
    ("nnp", "proper noun, singular"),
    ("nnps", "proper noun, plural"),
    ("pdt", "predeterminer"),
    ("pos", "possessive ending"),
    ("prp", "personal pronoun"),
    ("prp$", "possessive pronoun"),
    ("rb", "adverb"),
    ("rbr", "adverb, comparative"),
    ("rbs", "adverb, superlative"),
    ("rp", "particle"),
    ("sym", "symbol"),
    ("to", "to"),
    ("uh", "interjection"),
    ("vb", "verb, base form"),
    ("vbd", "verb, past tense"),
    ("vbg", "verb, gerund or present participle"),
    ("vbn", "verb, past participle"),
    ("vbp", "verb, non-3rd person singular present"),
    ("vbz", "verb, 3rd person singular present"),
    ("wdt", "wh-determiner"),
    ("wp", "wh-pronoun"),
    ("wp$", "possessive wh-pronoun"),
    ("wrb", "wh-adverb"),
];

/// Whether `tag` is a recognised Penn tag.
pub fn is_penn_tag(tag: &str) -> bool {
    PENN_TAGS.iter().any(|(t, _)| *t == tag)
}

/// Description of `tag`, if recognised.
pub fn describe(tag: &str) -> Option<&'static str> {
    PENN_TAGS.iter().find(|(t, _)| *t == tag).map(|(_, d)| *d)
}

pub(crate) fn ensure_penn_tag(tag: &str) -> Result<(), QueryError> {
    if is_penn_tag(tag) {
        Ok(())
    } else {
        Err(QueryError::InvalidArgument(format!(
            "'{}' is not a recognised part-of-speech tag",
            tag
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_tags() {
        assert!(is_penn_tag("nn"));
        assert!(is_penn_tag("prp$"));
        assert!(!is_penn_tag("NN"));
        assert!(!is_penn_tag("noun"));
        assert_eq!(describe("vbd"), Some("verb, past tense"));
    }

    #[test]
    fn rejects_unknown() {
        assert!(ensure_penn_tag("jj").is_ok());
        assert!(matches!(ensure_penn_tag("xx"), Err(QueryError::InvalidArgument(_))));
    }
}
