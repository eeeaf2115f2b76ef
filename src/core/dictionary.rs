//! Categorized word dictionary
//!
//! An immutable word → category mapping with uniform random selection.
//! Built once (from the embedded list or a file) and shared with the engine.

use super::word::{Word, WordError};
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use thiserror::Error;

/// Category reported for words without an explicit one
pub const FALLBACK_CATEGORY: &str = "General Computing";

/// A single dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub word: Word,
    pub category: String,
}

/// Error type for dictionary construction and loading
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Dictionary must contain at least one word")]
    Empty,
    #[error("Invalid word '{word}': {source}")]
    InvalidWord {
        word: String,
        #[source]
        source: WordError,
    },
    #[error("Duplicate word '{0}'")]
    DuplicateWord(String),
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<DictionaryError>,
    },
    #[error("Failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable categorized word list
///
/// Every word maps to exactly one category; the list is never empty.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<Entry>,
    index: FxHashMap<String, usize>,
}

impl Dictionary {
    /// Build a dictionary from `(word, category)` pairs
    ///
    /// Words are normalized to uppercase. An empty category is replaced by
    /// [`FALLBACK_CATEGORY`].
    ///
    /// # Errors
    /// Returns `DictionaryError` if the list is empty, a word is invalid, or a
    /// word appears twice.
    ///
    /// # Examples
    /// ```
    /// use hangman::core::Dictionary;
    ///
    /// let dict = Dictionary::new([("java", "Programming Languages")]).unwrap();
    /// assert_eq!(dict.category_of("JAVA"), "Programming Languages");
    /// assert_eq!(dict.category_of("COBOL"), "General Computing");
    /// ```
    pub fn new<I, W, C>(entries: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (W, C)>,
        W: AsRef<str>,
        C: AsRef<str>,
    {
        let mut built = Vec::new();
        let mut index = FxHashMap::default();

        for (raw_word, raw_category) in entries {
            let raw_word = raw_word.as_ref();
            let word = Word::new(raw_word).map_err(|source| DictionaryError::InvalidWord {
                word: raw_word.to_string(),
                source,
            })?;

            if index.contains_key(word.text()) {
                return Err(DictionaryError::DuplicateWord(word.text().to_string()));
            }

            let category = match raw_category.as_ref().trim() {
                "" => FALLBACK_CATEGORY.to_string(),
                category => category.to_string(),
            };

            index.insert(word.text().to_string(), built.len());
            built.push(Entry { word, category });
        }

        if built.is_empty() {
            return Err(DictionaryError::Empty);
        }

        Ok(Self {
            entries: built,
            index,
        })
    }

    /// The dictionary compiled into the binary
    ///
    /// # Panics
    /// Will not panic - the embedded list is validated by the build script.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(crate::wordlists::DICTIONARY.iter().copied())
            .expect("embedded dictionary validated at build time")
    }

    /// Number of words
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; construction rejects empty lists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up the category for a word, falling back to [`FALLBACK_CATEGORY`]
    #[must_use]
    pub fn category_of(&self, word: &str) -> &str {
        self.index
            .get(&word.to_ascii_uppercase())
            .map_or(FALLBACK_CATEGORY, |&i| self.entries[i].category.as_str())
    }

    /// Words grouped by category, both sorted alphabetically
    #[must_use]
    pub fn categories(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for entry in &self.entries {
            grouped
                .entry(entry.category.as_str())
                .or_default()
                .push(entry.word.text());
        }
        for words in grouped.values_mut() {
            words.sort_unstable();
        }
        grouped
    }

    /// Uniformly pick a word and its category using the given random source
    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> (&Word, &str) {
        // Non-empty by construction, so `choose` always yields an entry
        let entry = self.entries.choose(rng).unwrap_or(&self.entries[0]);
        (&entry.word, self.category_of(entry.word.text()))
    }

    /// Uniformly pick a word and its category using the thread-local RNG
    #[must_use]
    pub fn pick_random(&self) -> (&Word, &str) {
        self.pick_random_with(&mut rand::rng())
    }
}
