//! Parsing of line-oriented dictionary resources.
//!
//! ```text
//! # comment
//! blog: b-l-ao1-g | nn vbg
//! cepstral: k-eh1-p s-t-r-ax-l | nnp
//! ```
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use smol_str::SmolStr;

use super::LexicalEntry;
use crate::error::LoadError;
use crate::vfs::Filesystem;

const COMMENT: char = '#';
const LEXICON_DELIM: char = ':';
const DATA_DELIM: char = '|';

/// One parsed line.
pub type RawEntry = (SmolStr, LexicalEntry);

/// Parses a single non-comment, non-blank line.
pub fn parse_line(line: &str) -> Option<RawEntry> {
    let (word, data) = line.split_once(LEXICON_DELIM)?;
    let word = word.trim();
    if word.is_empty() {
        return None;
    }

    let mut fields = data.split(DATA_DELIM);
    let pronunciation = fields.next()?.trim();
    let pos = fields.next()?;
    if fields.next().is_some() || pronunciation.is_empty() {
        return None;
    }

    Some((
        word.into(),
        LexicalEntry {
            pronunciation: pronunciation.into(),
            pos: pos.split_whitespace().map(SmolStr::from).collect(),
        },
    ))
}

/// Parses every entry of `reader`. `name` labels I/O errors.
pub fn parse_entries<R: Read>(name: &str, reader: R) -> Result<Vec<RawEntry>, LoadError> {
    let mut entries = Vec::new();

    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|source| LoadError::ResourceUnavailable {
            path: name.to_string(),
            source,
        })?;

        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => {
                return Err(LoadError::MalformedEntry {
                    line: i + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(entries)
}

/// Opens and parses `path`.
pub fn read_entries<FS: Filesystem>(fs: &FS, path: &Path) -> Result<Vec<RawEntry>, LoadError> {
    let name = path.display().to_string();
    let file = fs
        .open(path)
        .map_err(|source| LoadError::ResourceUnavailable {
            path: name.clone(),
            source,
        })?;
    parse_entries(&name, file)
}
