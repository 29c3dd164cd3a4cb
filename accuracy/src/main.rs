use chrono::prelude::*;
use std::error::Error;
use std::{
    io::Write,
    path::Path,
    time::{Instant, SystemTime},
};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use phonolex::distance::letter_distance;
use phonolex::vfs::Fs;
use phonolex::{LetterQuery, LexicalStore, Lexicon, MatchConfig, MatchResult};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use smol_str::SmolStr;
use structopt::clap::{App, AppSettings, Arg};

fn load_words(
    path: &str,
    max_words: Option<usize>,
) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    Ok(read_words(file, max_words))
}

fn read_words<R: std::io::Read>(reader: R, max_words: Option<usize>) -> Vec<(String, String)> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    rdr.records()
        .filter_map(Result::ok)
        .filter_map(|r| {
            r.get(0)
                .and_then(|x| r.get(1).map(|y| (x.to_string(), y.to_string())))
        })
        .filter(|(input, _)| {
            if input.chars().any(char::is_whitespace) {
                log::warn!("Skipping multi-word input '{}'", input);
                return false;
            }
            true
        })
        .take(max_words.unwrap_or(std::usize::MAX))
        .collect()
}

#[derive(Debug, Default, Serialize, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
struct Time {
    secs: u64,
    subsec_nanos: u32,
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let ms = self.secs * 1000 + (self.subsec_nanos as u64 / 1_000_000);
        write!(f, "{}ms", ms)
    }
}

impl From<std::time::Duration> for Time {
    fn from(d: std::time::Duration) -> Time {
        Time {
            secs: d.as_secs(),
            subsec_nanos: d.subsec_nanos(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AccuracyResult<'a> {
    input: &'a str,
    expected: &'a str,
    distance: usize,
    match_distance: Option<usize>,
    matches: Vec<SmolStr>,
    found: bool,
    error: Option<String>,
    time: Time,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a MatchConfig,
    query: &'a LetterQuery,
    lexicon_size: usize,
    summary: Summary,
    results: Vec<AccuracyResult<'a>>,
    start_timestamp: Time,
    total_time: Time,
}

#[derive(Serialize, Default, Debug, Clone)]
struct Summary {
    total_words: u32,
    only_match: u32,
    any_match: u32,
    no_matches: u32,
    only_wrong: u32,
    errors: u32,
    slowest_lookup: Time,
    fastest_lookup: Time,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let percent = |v: u32| -> String {
            format!("{:.2}%", v as f32 / self.total_words.max(1) as f32 * 100f32)
        };

        write!(
            f,
            "[only] {} [any] {} [none] {} [wrong] {} [errors] {} [fast] {} [slow] {}",
            percent(self.only_match),
            percent(self.any_match),
            percent(self.no_matches),
            percent(self.only_wrong),
            self.errors,
            self.fastest_lookup,
            self.slowest_lookup
        )
    }
}

impl Summary {
    fn new(results: &[AccuracyResult<'_>]) -> Summary {
        let mut summary = Summary::default();

        results.iter().for_each(|result| {
            summary.total_words += 1;

            if result.error.is_some() {
                summary.errors += 1;
            } else if result.found {
                summary.any_match += 1;

                if result.matches.len() == 1 {
                    summary.only_match += 1;
                }
            } else if result.matches.is_empty() {
                summary.no_matches += 1;
            } else {
                summary.only_wrong += 1;
            }
        });

        summary.slowest_lookup = results.iter().map(|x| x.time).max().unwrap_or_default();
        summary.fastest_lookup = results.iter().map(|x| x.time).min().unwrap_or_default();

        summary
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let matches = App::new("phonolex-accuracy")
        .setting(AppSettings::ArgRequiredElseHelp)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Measures how often the intended word is among the closest spelling matches.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .takes_value(true)
                .help("Provide JSON config file to override match defaults"),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("The 'input -> expected' list in tab-delimited value file (TSV)"),
        )
        .arg(
            Arg::with_name("dict")
                .short("d")
                .takes_value(true)
                .help("Use the given dictionary instead of the bundled one"),
        )
        .arg(
            Arg::with_name("addenda")
                .short("a")
                .takes_value(true)
                .help("Merge the given addenda file over the dictionary"),
        )
        .arg(
            Arg::with_name("preserve-length")
                .short("l")
                .help("Only consider words of the same length as the input"),
        )
        .arg(
            Arg::with_name("json-output")
                .short("o")
                .value_name("JSON-OUTPUT")
                .help("The file path for the JSON report output"),
        )
        .arg(
            Arg::with_name("tsv-output")
                .short("t")
                .value_name("TSV-OUTPUT")
                .help("The file path for the TSV line append"),
        )
        .arg(
            Arg::with_name("max-words")
                .short("w")
                .takes_value(true)
                .help("Truncate typos list to max number of words specified"),
        )
        .get_matches();

    let cfg: MatchConfig = match matches.value_of("config") {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            serde_json::from_reader(file)?
        }
        None => MatchConfig::default(),
    };

    let query = LetterQuery {
        preserve_length: matches.is_present("preserve-length"),
        ..LetterQuery::default()
    };

    let addenda = matches.value_of("addenda").map(Path::new);
    let store = match matches.value_of("dict") {
        Some(path) => LexicalStore::open(&Fs, Path::new(path), addenda)?,
        None => LexicalStore::load(&Fs, addenda)?,
    };
    store.preload_features();

    let words = match matches.value_of("words") {
        Some(path) => load_words(
            path,
            matches
                .value_of("max-words")
                .and_then(|x| x.parse::<usize>().ok()),
        )?,
        None => {
            eprintln!("No word list for given path; aborting.");
            std::process::exit(1);
        }
    };

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{pos}/{len} [{percent}%] {wide_bar} {elapsed_precise}"),
    );

    let start_time = Instant::now();
    let results = words
        .par_iter()
        .progress_with(pb)
        .map(|(input, expected)| {
            let now = Instant::now();
            let (result, error) = match store.best_letter_matches(input, &query, &cfg) {
                Ok(result) => (result, None),
                Err(e) => {
                    log::error!("Lookup of '{}' failed: {}", input, e);
                    (MatchResult::none(), Some(e.to_string()))
                }
            };
            let time = Time::from(now.elapsed());

            let mut matches: Vec<SmolStr> = result.words.into_iter().collect();
            matches.sort();
            let found = matches.iter().any(|x| x == expected.as_str());

            AccuracyResult {
                input,
                expected,
                distance: letter_distance(input, expected),
                match_distance: result.distance,
                matches,
                found,
                error,
                time,
            }
        })
        .collect::<Vec<_>>();

    let total_time = Time::from(start_time.elapsed());
    let start_timestamp = Time::from(
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default(),
    );

    let summary = Summary::new(&results);
    println!("{}", summary);

    if let Some(path) = matches.value_of("json-output") {
        let output = std::fs::File::create(path)?;
        let report = Report {
            config: &cfg,
            query: &query,
            lexicon_size: store.len(),
            summary,
            results,
            start_timestamp,
            total_time,
        };
        println!("Writing JSON report…");
        serde_json::to_writer_pretty(output, &report)?;
    } else if let Some(path) = matches.value_of("tsv-output") {
        let mut output = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        if output.metadata()?.len() == 0 {
            // new file, write headers:
            output.write_all(b"id\tdate\ttag/branch\tonly\tany\tno matches\twrong matches\n")?;
        }
        let git_id = std::process::Command::new("git")
            .arg("rev-parse")
            .arg("--short")
            .arg("HEAD")
            .output()?;
        let git_descr = std::process::Command::new("git").arg("describe").output()?;

        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            String::from_utf8_lossy(&git_id.stdout).trim(),
            Local::now().to_rfc3339(),
            String::from_utf8_lossy(&git_descr.stdout).trim(),
            summary.only_match,
            summary.any_match,
            summary.no_matches,
            summary.only_wrong,
        )?;
    };

    println!("Done!");
    Ok(())
}
