use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gumdrop::Options;
use serde::Serialize;
use smol_str::SmolStr;

use phonolex::codec::{self, StressSlice};
use phonolex::scan;
use phonolex::vfs::Fs;
use phonolex::{LetterQuery, LexicalEntry, LexicalStore, Lexicon, MatchConfig, MatchResult};

trait OutputWriter {
    fn write_lookup(&mut self, word: &str, entry: Option<&LexicalEntry>, rhyme: &StressSlice);
    fn write_matches(&mut self, word: &str, result: &MatchResult);
    fn write_words(&mut self, word: &str, words: &[SmolStr]);
    fn write_predicate(&mut self, a: &str, b: &str, value: bool);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_lookup(&mut self, word: &str, entry: Option<&LexicalEntry>, rhyme: &StressSlice) {
        match entry {
            Some(entry) => {
                println!("Input: {}\t\t[{}]", word, entry.pronunciation);
                println!("  pos: {}", entry.pos.join(" "));
                if let StressSlice::Found(s) = rhyme {
                    println!("  rhyme: {}", s);
                }
            }
            None => println!("Input: {}\t\t[NOT FOUND]", word),
        }
        println!();
    }

    fn write_matches(&mut self, word: &str, result: &MatchResult) {
        match result.distance {
            Some(d) => {
                println!("Input: {}\t\t[distance {}]", word, d);
                for w in sorted(result.words.iter()) {
                    println!("{}", w);
                }
            }
            None => println!("Input: {}\t\t[NO MATCHES]", word),
        }
        println!();
    }

    fn write_words(&mut self, word: &str, words: &[SmolStr]) {
        println!("Input: {}\t\t[{}]", word, words.len());
        for w in words {
            println!("{}", w);
        }
        println!();
    }

    fn write_predicate(&mut self, a: &str, b: &str, value: bool) {
        println!("{} / {}\t\t[{}]", a, b, if value { "YES" } else { "NO" });
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum Record {
    Lookup {
        word: String,
        entry: Option<LexicalEntry>,
        rhyme: Option<SmolStr>,
    },
    Matches {
        word: String,
        distance: Option<usize>,
        words: Vec<SmolStr>,
    },
    Words {
        word: String,
        words: Vec<SmolStr>,
    },
    Predicate {
        a: String,
        b: String,
        value: bool,
    },
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<Record>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_lookup(&mut self, word: &str, entry: Option<&LexicalEntry>, rhyme: &StressSlice) {
        self.results.push(Record::Lookup {
            word: word.to_owned(),
            entry: entry.cloned(),
            rhyme: rhyme.found().map(SmolStr::from),
        });
    }

    fn write_matches(&mut self, word: &str, result: &MatchResult) {
        self.results.push(Record::Matches {
            word: word.to_owned(),
            distance: result.distance,
            words: sorted(result.words.iter()),
        });
    }

    fn write_words(&mut self, word: &str, words: &[SmolStr]) {
        self.results.push(Record::Words {
            word: word.to_owned(),
            words: words.to_vec(),
        });
    }

    fn write_predicate(&mut self, a: &str, b: &str, value: bool) {
        self.results.push(Record::Predicate {
            a: a.to_owned(),
            b: b.to_owned(),
            value,
        });
    }

    fn finish(&mut self) {
        match serde_json::to_string_pretty(self) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn sorted<'a, I: Iterator<Item = &'a SmolStr>>(words: I) -> Vec<SmolStr> {
    let mut v: Vec<SmolStr> = words.cloned().collect();
    v.sort();
    v
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "base dictionary to use instead of the bundled one")]
    dict: Option<PathBuf>,

    #[options(help = "addenda file merged over the base dictionary")]
    addenda: Option<PathBuf>,

    #[options(help = "JSON file overriding match settings")]
    config: Option<PathBuf>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "print pronunciation and tags")]
    Lookup(WordsArgs),

    #[options(help = "find the closest words by spelling or sound")]
    Similar(SimilarArgs),

    #[options(help = "find rhymes")]
    Rhymes(WordsArgs),

    #[options(help = "find alliterations")]
    Alliterations(WordsArgs),

    #[options(help = "check whether two words rhyme")]
    IsRhyme(PairArgs),

    #[options(help = "check whether two words alliterate")]
    IsAlliteration(PairArgs),

    #[options(help = "find words containing or contained in the input")]
    Containing(ContainingArgs),

    #[options(help = "list words fully matching a regular expression")]
    Words(RegexArgs),

    #[options(help = "pick a random word")]
    Random(RandomArgs),
}

#[derive(Debug, Options)]
struct WordsArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Letter,
    Sound,
    Both,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Letter
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "letter" => Ok(Mode::Letter),
            "sound" => Ok(Mode::Sound),
            "both" => Ok(Mode::Both),
            _ => Err(format!("unknown mode '{}', expected letter, sound or both", s)),
        }
    }
}

#[derive(Debug, Options)]
struct SimilarArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "letter, sound or both", default = "letter")]
    mode: Mode,

    #[options(short = "l", help = "only consider words of the same length")]
    preserve_length: bool,

    #[options(no_short, help = "smallest distance to report")]
    min_distance: Option<usize>,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct PairArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, required, help = "the two words to compare")]
    words: Vec<String>,
}

#[derive(Debug, Options)]
struct ContainingArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, long = "sub", help = "only words contained in the input")]
    sub_only: bool,

    #[options(no_short, long = "super", help = "only words containing the input")]
    super_only: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct RegexArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, required, help = "regular expression each word must fully match")]
    pattern: String,
}

#[derive(Debug, Options)]
struct RandomArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "primary part-of-speech tag")]
    pos: Option<String>,

    #[options(help = "length in characters, 0 for any")]
    length: Option<usize>,

    #[options(help = "number of syllables")]
    syllables: Option<usize>,
}

fn read_inputs(inputs: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }

    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer
        .lines()
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(str::to_string)
        .collect())
}

fn load_store(dict: Option<&Path>, addenda: Option<&Path>) -> anyhow::Result<LexicalStore> {
    let store = match dict {
        Some(path) => LexicalStore::open(&Fs, path, addenda)?,
        None => LexicalStore::load(&Fs, addenda)?,
    };
    Ok(store)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MatchConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(MatchConfig::default()),
    }
}

fn similar(
    store: &dyn Lexicon,
    args: SimilarArgs,
    config: &MatchConfig,
    writer: &mut dyn OutputWriter,
) -> anyhow::Result<()> {
    let query = LetterQuery {
        preserve_length: args.preserve_length,
        min_distance: args.min_distance.unwrap_or(LetterQuery::default().min_distance),
    };

    for word in read_inputs(args.inputs)? {
        match args.mode {
            Mode::Letter => {
                let result = store.best_letter_matches(&word, &query, config)?;
                writer.write_matches(&word, &result);
            }
            Mode::Sound => {
                let result = store.best_sound_matches(&word, config)?;
                writer.write_matches(&word, &result);
            }
            Mode::Both => {
                let words = store.best_sound_and_letter_matches(&word, config)?;
                writer.write_words(&word, &sorted(words.iter()));
            }
        }
    }
    Ok(())
}

fn containing(
    store: &dyn Lexicon,
    args: ContainingArgs,
    config: &MatchConfig,
    writer: &mut dyn OutputWriter,
) -> anyhow::Result<()> {
    for word in read_inputs(args.inputs)? {
        let words = match (args.sub_only, args.super_only) {
            (true, false) => store.substrings_of(&word, config)?,
            (false, true) => store.superstrings_of(&word, config)?,
            _ => store.containing(&word, config)?,
        };
        writer.write_words(&word, &sorted(words.iter()));
    }
    Ok(())
}

fn random(store: &LexicalStore, args: RandomArgs, writer: &mut dyn OutputWriter) -> anyhow::Result<()> {
    let word = scan::random_word_matching(store, args.pos.as_deref(), args.length, args.syllables)?;

    let words: Vec<SmolStr> = word.into_iter().collect();
    writer.write_words("random", &words);
    Ok(())
}

fn run(args: Args, writer: &mut dyn OutputWriter) -> anyhow::Result<()> {
    let command = match args.command {
        Some(c) => c,
        None => return Ok(()),
    };

    let store = load_store(args.dict.as_deref(), args.addenda.as_deref())?;
    let config = load_config(args.config.as_deref())?;

    match command {
        Command::Lookup(a) => {
            for word in read_inputs(a.inputs)? {
                let entry = store.lookup(&word);
                let rhyme = codec::last_stressed_suffix(&store, &word);
                writer.write_lookup(&word, entry.as_ref(), &rhyme);
            }
        }
        Command::Similar(a) => similar(&store, a, &config, writer)?,
        Command::Rhymes(a) => {
            for word in read_inputs(a.inputs)? {
                let words = store.rhymes_of(&word)?;
                writer.write_words(&word, &sorted(words.iter()));
            }
        }
        Command::Alliterations(a) => {
            for word in read_inputs(a.inputs)? {
                let words = store.alliterations_of(&word, &config)?;
                writer.write_words(&word, &sorted(words.iter()));
            }
        }
        Command::IsRhyme(a) => {
            let (x, y) = pair(&a.words)?;
            writer.write_predicate(x, y, store.is_rhyme(x, y)?);
        }
        Command::IsAlliteration(a) => {
            let (x, y) = pair(&a.words)?;
            writer.write_predicate(x, y, store.is_alliteration(x, y)?);
        }
        Command::Containing(a) => containing(&store, a, &config, writer)?,
        Command::Words(a) => {
            let words = store.words(&a.pattern)?;
            writer.write_words(&a.pattern, &sorted(words.iter()));
        }
        Command::Random(a) => random(&store, a, writer)?,
    }

    Ok(())
}

fn pair(words: &[String]) -> anyhow::Result<(&str, &str)> {
    match words {
        [a, b] => Ok((a.as_str(), b.as_str())),
        _ => anyhow::bail!("expected exactly two words, got {}", words.len()),
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    run(args, &mut *writer)?;
    writer.finish();

    Ok(())
}
