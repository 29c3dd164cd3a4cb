/*! Nearest-neighbour matching and phonological predicates over a pronouncing
lexicon.

Every entry of the lexicon carries a raw pronunciation (syllables separated by
spaces, phonemes by `-`, primary stress marked with `1` on the vowel) and a list
of part-of-speech tags, e.g.

```text
cat: k-ae1-t | nn
ocean: ow1 sh-ax-n | nn
```

The library answers "which words are closest to this one", by spelling or by
sound, and decides whether two words rhyme or alliterate.

# Usage examples

```
use phonolex::{LexicalStore, Lexicon, LetterQuery, MatchConfig};

let store = LexicalStore::parse("\
cat: k-ae1-t | nn
hat: hh-ae1-t | nn
cats: k-ae1-t-s | nns
").unwrap();

let config = MatchConfig::default();
let matches = store
    .best_letter_matches("cat", &LetterQuery::default(), &config)
    .unwrap();

assert_eq!(matches.distance, Some(1));
assert!(matches.words.contains("hat"));
assert!(!matches.words.contains("cats"));
assert!(store.is_rhyme("cat", "hat").unwrap());
```

All query functions take the store they search explicitly; there is no global
lexicon.
*/

#![warn(missing_docs)]
pub mod codec;
pub mod config;
pub mod distance;
pub mod error;
pub mod lexicon;
pub mod phonology;
pub mod pos;
pub mod query;
pub mod scan;
pub mod search;
pub mod vfs;

pub use crate::config::{LetterQuery, MatchConfig};
pub use crate::error::{CodecError, LoadError, QueryError};
pub use crate::lexicon::{Corpus, LexicalEntry, LexicalStore};
pub use crate::query::Lexicon;
pub use crate::scan::CorpusIterator;
pub use crate::search::{AcceptanceFilter, MatchResult};
