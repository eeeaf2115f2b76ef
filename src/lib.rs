//! Hangman
//!
//! A timed hangman game: guess a hidden word from a categorized dictionary one
//! letter at a time, before six wrong guesses or the sixty-second countdown end
//! the round. Wins score points and raise the level; three hints per round.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hangman::core::Dictionary;
//! use hangman::engine::{GameConfig, GameEngine};
//!
//! let engine = GameEngine::new(Dictionary::builtin(), GameConfig::default());
//! engine.guess('e');
//! println!("{} ({})", engine.display_word(), engine.category());
//! engine.shutdown();
//! ```

// Core domain types
pub mod core;

// Session state machine and countdown
pub mod engine;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
