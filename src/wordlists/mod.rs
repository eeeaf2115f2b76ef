//! Word lists for hangman
//!
//! Provides the embedded dictionary compiled into the binary and a loader for custom files.

mod embedded;
pub mod loader;

pub use embedded::{DICTIONARY, DICTIONARY_COUNT};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FALLBACK_CATEGORY;

    #[test]
    fn dictionary_count_matches_const() {
        assert_eq!(DICTIONARY.len(), DICTIONARY_COUNT);
    }

    #[test]
    fn dictionary_words_are_uppercase_letters() {
        for &(word, _) in DICTIONARY {
            assert!(!word.is_empty());
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "Word '{word}' contains non-uppercase chars"
            );
        }
    }

    #[test]
    fn dictionary_categories_are_explicit() {
        for &(word, category) in DICTIONARY {
            assert!(!category.is_empty(), "Word '{word}' has no category");
            assert_ne!(category, FALLBACK_CATEGORY);
        }
    }

    #[test]
    fn dictionary_contains_classic_words() {
        let words: Vec<&str> = DICTIONARY.iter().map(|&(w, _)| w).collect();
        for expected in ["JAVA", "PYTHON", "THREAD", "ALGORITHM", "ENCAPSULATION"] {
            assert!(words.contains(&expected), "missing {expected}");
        }
    }
}
