//! Dictionary loading utilities
//!
//! Parses `WORD[,Category]` text files into a [`Dictionary`].

use crate::core::{Dictionary, DictionaryError, Word};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Load a dictionary from a file
///
/// One entry per line as `WORD,Category`. Blank lines and lines starting with
/// `#` are skipped; a line without a category gets the fallback category.
///
/// # Errors
///
/// Returns `DictionaryError::Io` if the file cannot be read, or a
/// `DictionaryError::Line` naming the offending line.
///
/// # Examples
/// ```no_run
/// use hangman::wordlists::loader::load_from_file;
///
/// let dict = load_from_file("words.txt").unwrap();
/// println!("Loaded {} words", dict.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Dictionary, DictionaryError> {
    let content = fs::read_to_string(path)?;
    parse_dictionary(&content)
}

/// Parse dictionary text (see [`load_from_file`] for the format)
///
/// # Errors
///
/// Returns a `DictionaryError::Line` for an invalid or duplicate word, or
/// `DictionaryError::Empty` if no entries remain after skipping comments.
pub fn parse_dictionary(content: &str) -> Result<Dictionary, DictionaryError> {
    let mut seen = FxHashSet::default();
    let mut entries: Vec<(String, &str)> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (raw_word, category) = trimmed.split_once(',').unwrap_or((trimmed, ""));
        let raw_word = raw_word.trim();

        let word = Word::new(raw_word).map_err(|source| {
            at_line(
                idx + 1,
                DictionaryError::InvalidWord {
                    word: raw_word.to_string(),
                    source,
                },
            )
        })?;

        if !seen.insert(word.text().to_string()) {
            return Err(at_line(
                idx + 1,
                DictionaryError::DuplicateWord(word.text().to_string()),
            ));
        }

        entries.push((word.text().to_string(), category.trim()));
    }

    Dictionary::new(entries)
}

fn at_line(line: usize, source: DictionaryError) -> DictionaryError {
    DictionaryError::Line {
        line,
        source: Box::new(source),
    }
}
