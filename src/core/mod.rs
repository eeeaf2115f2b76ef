//! Core domain types for hangman
//!
//! This module contains the words and the categorized dictionary the game draws from.
//! Everything here is immutable once built and free of timing concerns.

mod dictionary;
mod word;

pub use dictionary::{Dictionary, DictionaryError, Entry, FALLBACK_CATEGORY};
pub use word::{Word, WordError};
