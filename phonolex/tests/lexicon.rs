use std::io::Write;

use hashbrown::HashSet;

use phonolex::vfs::Fs;
use phonolex::{LetterQuery, LexicalStore, Lexicon, LoadError, MatchConfig, QueryError};

const FIXTURE: &str = "\
cat: k-ae1-t | nn
hat: h-ae1-t | nn
bat: b-ae1-t | nn
cats: k-ae1-t-s | nns
hot: h-aa1-t | nn
";

fn fixture() -> LexicalStore {
    LexicalStore::parse(FIXTURE).unwrap()
}

#[test]
fn letter_matches_for_cat() {
    let r = fixture()
        .best_letter_matches("cat", &LetterQuery::default(), &MatchConfig::default())
        .unwrap();
    assert_eq!(r.distance, Some(1));
    assert!(r.words.contains("hat"));
    assert!(r.words.contains("bat"));
    assert!(!r.words.contains("cats"));
}

#[test]
fn rhyme_scenarios() {
    let store = fixture();
    assert!(store.is_rhyme("cat", "hat").unwrap());
    assert!(!store.is_rhyme("cat", "hot").unwrap());
    assert!(store.is_alliteration("cat", "cats").unwrap());
}

#[test]
fn regex_scenario() {
    let words = fixture().words("c.t").unwrap();
    assert_eq!(words.len(), 1);
    assert!(words.contains("cat"));
}

#[test]
fn unknown_word() {
    let store = fixture();
    assert!(!store.contains("dog"));
    assert!(store.lookup("dog").is_none());

    let r = store.best_sound_matches("dog", &MatchConfig::default()).unwrap();
    assert_eq!(r.distance, None);
    assert!(r.words.is_empty());
}

#[test]
fn letter_results_exclude_trivial_forms() {
    let store = LexicalStore::bundled().unwrap();
    let config = MatchConfig::default();
    let words: Vec<_> = store.iter().collect();

    for w in words.iter().step_by(7) {
        let r = store
            .best_letter_matches(w, &LetterQuery::default(), &config)
            .unwrap();
        assert!(!r.words.contains(w.as_str()));
        assert!(!r.words.contains(format!("{}s", w).as_str()));
        assert!(!r.words.contains(format!("{}es", w).as_str()));
    }
}

#[test]
fn letter_distance_is_minimal() {
    let store = LexicalStore::bundled().unwrap();
    let config = MatchConfig::default();
    let words: Vec<_> = store.iter().collect();

    for w in ["cat", "tree", "bight", "summr", "oceans"] {
        let r = store
            .best_letter_matches(w, &LetterQuery::default(), &config)
            .unwrap();
        let d = r.distance.unwrap();

        for c in &words {
            let trivial = c == w || *c == format!("{}s", w) || *c == format!("{}es", w);
            if trivial || c.len() < config.letter_min_length {
                continue;
            }
            let cd = strsim::levenshtein(w, c);
            assert!(cd >= d, "{} is closer to {} than {}", c, w, d);
            if cd == d {
                assert!(r.words.contains(c.as_str()), "{} missing for {}", c, w);
            }
        }
    }
}

#[test]
fn predicates_on_bundled_lexicon() {
    let store = LexicalStore::bundled().unwrap();
    let words: Vec<_> = store.iter().collect();

    for w in &words {
        assert!(!store.is_rhyme(w, w).unwrap());
        assert!(store.is_alliteration(w, w).unwrap());
    }

    for a in words.iter().step_by(5) {
        for b in words.iter().step_by(3) {
            assert_eq!(store.is_rhyme(a, b).unwrap(), store.is_rhyme(b, a).unwrap());
            assert_eq!(
                store.is_alliteration(a, b).unwrap(),
                store.is_alliteration(b, a).unwrap()
            );
        }
    }

    let rhymes = store.rhymes_of("cat").unwrap();
    for w in ["hat", "bat", "fat", "mat", "rat", "sat", "that", "vat", "pat", "at"] {
        assert!(rhymes.contains(w), "{} should rhyme with cat", w);
    }
    assert!(!rhymes.contains("cats"));
}

#[test]
fn containment_properties() {
    let store = LexicalStore::bundled().unwrap();
    let config = MatchConfig::default();

    for w in ["cat", "water", "star", "into", "wonderful"] {
        let sub = store.substrings_of(w, &config).unwrap();
        let sup = store.superstrings_of(w, &config).unwrap();
        let all = store.containing(w, &config).unwrap();

        let union: HashSet<_> = sub.union(&sup).cloned().collect();
        assert_eq!(all, union);
        assert!(all
            .iter()
            .all(|c| c.chars().count() >= config.containment_min_length));
    }
}

#[test]
fn single_word_arguments() {
    let store = fixture();
    let config = MatchConfig::default();

    assert!(matches!(
        store.rhymes_of("the cat"),
        Err(QueryError::InvalidArgument(_))
    ));
    assert!(store.is_rhyme("cat", "a hat").is_err());
    assert!(store.containing("cat hat", &config).is_err());
    assert!(store
        .best_sound_and_letter_matches("cat hat", &config)
        .is_err());
}

#[test]
fn loads_from_disk_with_addenda() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.txt");
    let addenda = dir.path().join("addenda.txt");

    std::fs::write(&base, FIXTURE).unwrap();
    let mut f = std::fs::File::create(&addenda).unwrap();
    writeln!(f, "# user words").unwrap();
    writeln!(f, "hot: hh-aa1-t | jj").unwrap();
    writeln!(f, "mat: m-ae1-t | nn").unwrap();
    drop(f);

    let store = LexicalStore::open(&Fs, &base, Some(&addenda)).unwrap();
    assert_eq!(store.len(), 6);
    assert_eq!(store.addenda_count(), 2);
    assert_eq!(store.raw_pronunciation("hot").unwrap(), "hh-aa1-t");
    assert!(store.is_rhyme("mat", "cat").unwrap());

    let missing = dir.path().join("missing.txt");
    let store = LexicalStore::open(&Fs, &base, Some(&missing)).unwrap();
    assert_eq!(store.len(), 5);

    let err = LexicalStore::open(&Fs, &missing, None).unwrap_err();
    assert!(matches!(err, LoadError::ResourceUnavailable { .. }));
}

#[test]
fn malformed_dictionary_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.txt");
    std::fs::write(&base, "cat: k-ae1-t | nn\nhat hh-ae1-t nn\n").unwrap();

    match LexicalStore::open(&Fs, &base, None) {
        Err(LoadError::MalformedEntry { line, .. }) => assert_eq!(line, 2),
        other => panic!("unexpected {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn concurrent_readers_and_replacement() {
    let store = std::sync::Arc::new(LexicalStore::bundled().unwrap());
    store.preload_features();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..20 {
                    let r = store
                        .best_letter_matches("cat", &LetterQuery::default(), &MatchConfig::default())
                        .unwrap();
                    assert!(r.distance.is_some());
                }
            })
        })
        .collect();

    store
        .replace_all(vec![
            ("cot", phonolex::LexicalEntry::new("k-aa1-t", "nn")),
            ("cut", phonolex::LexicalEntry::new("k-ah1-t", "nn")),
        ])
        .unwrap();

    for r in readers {
        r.join().unwrap();
    }

    assert_eq!(store.len(), 2);
    assert_eq!(store.addenda_count(), 0);
}
