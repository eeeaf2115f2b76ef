//! Round and session state machine
//!
//! `Session` holds everything a round mutates plus the cross-round score and
//! level. It has no notion of threads: the engine wraps it in a lock and drives
//! `tick` from the countdown worker.

use super::config::{BASE_SCORE, GameConfig, TIME_BONUS_PER_SECOND, WRONG_GUESS_PENALTY};
use crate::core::Word;
use rustc_hash::FxHashSet;
use std::time::Instant;

/// Placeholder shown for letters not yet found
pub const HIDDEN_LETTER: char = '_';

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    OutOfGuesses,
    OutOfTime,
}

/// Progress of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost(LossReason),
}

impl RoundStatus {
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Externally visible engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Active,
    Paused,
    Won,
    Lost,
}

/// Why a guess was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    RoundOver,
    AlreadyGuessed,
    NotALetter,
}

/// Result of submitting a letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
    Rejected(RejectReason),
}

impl GuessOutcome {
    #[inline]
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Result of asking for a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// The letter was revealed and submitted as a guess
    Revealed(char),
    BudgetExhausted,
    NothingToReveal,
    RoundOver,
}

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Expired,
    Stopped,
}

/// Consistent copy of every observable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub word: String,
    pub category: String,
    pub display_word: String,
    pub guessed_letters: Vec<char>,
    pub wrong_guesses: u32,
    pub max_wrong_guesses: u32,
    pub hints_used: u32,
    pub max_hints: u32,
    pub score: u32,
    pub level: u32,
    pub time_remaining_secs: u32,
    pub state: GameState,
    pub loss_reason: Option<LossReason>,
}

impl SessionSnapshot {
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self.state, GameState::Won | GameState::Lost)
    }

    #[must_use]
    pub const fn is_game_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }
}

/// Mutable state of one game session
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    word: Word,
    category: String,
    guessed: FxHashSet<char>,
    wrong_guesses: u32,
    score: u32,
    level: u32,
    hints_used: u32,
    time_remaining: u32,
    status: RoundStatus,
    paused_at: Option<Instant>,
}

impl Session {
    /// Create a session with zero score and level and start its first round
    #[must_use]
    pub fn new(config: GameConfig, word: Word, category: impl Into<String>) -> Self {
        Self {
            config,
            word,
            category: category.into(),
            guessed: FxHashSet::default(),
            wrong_guesses: 0,
            score: 0,
            level: 0,
            hints_used: 0,
            time_remaining: config.time_limit_secs,
            status: RoundStatus::InProgress,
            paused_at: None,
        }
    }

    /// Replace the secret and clear all round-scoped fields
    ///
    /// Score and level carry over.
    pub fn start_round(&mut self, word: Word, category: impl Into<String>) {
        self.word = word;
        self.category = category.into();
        self.guessed.clear();
        self.wrong_guesses = 0;
        self.hints_used = 0;
        self.time_remaining = self.config.time_limit_secs;
        self.status = RoundStatus::InProgress;
        self.paused_at = None;
    }

    /// Submit a letter
    ///
    /// Ignored when the round is over, the character is not an ASCII letter, or
    /// the letter (in either case) was already tried.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.status.is_over() {
            return GuessOutcome::Rejected(RejectReason::RoundOver);
        }
        if !letter.is_ascii_alphabetic() {
            return GuessOutcome::Rejected(RejectReason::NotALetter);
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return GuessOutcome::Rejected(RejectReason::AlreadyGuessed);
        }

        if !self.word.contains(letter) {
            self.wrong_guesses += 1;
            if self.wrong_guesses >= self.config.max_wrong_guesses {
                self.status = RoundStatus::Lost(LossReason::OutOfGuesses);
            }
            return GuessOutcome::Miss;
        }

        if self.is_word_complete() {
            self.score += self.calculate_score();
            self.level += 1;
            self.status = RoundStatus::Won;
        }
        GuessOutcome::Hit
    }

    /// Reveal the first unguessed letter and submit it as a guess
    pub fn hint(&mut self) -> HintOutcome {
        if self.status.is_over() {
            return HintOutcome::RoundOver;
        }
        if self.hints_used >= self.config.max_hints {
            return HintOutcome::BudgetExhausted;
        }
        let Some(letter) = self.hint_letter() else {
            return HintOutcome::NothingToReveal;
        };

        self.hints_used += 1;
        let outcome = self.guess(letter);
        debug_assert_eq!(outcome, GuessOutcome::Hit);
        HintOutcome::Revealed(letter)
    }

    /// First letter of the word, left to right, not yet guessed
    #[must_use]
    pub fn hint_letter(&self) -> Option<char> {
        self.word.letters().find(|c| !self.guessed.contains(c))
    }

    #[must_use]
    pub fn can_use_hint(&self) -> bool {
        !self.status.is_over() && self.hints_used < self.config.max_hints
    }

    /// Points a win would award right now, never negative
    #[must_use]
    pub fn calculate_score(&self) -> u32 {
        (BASE_SCORE + TIME_BONUS_PER_SECOND * self.time_remaining)
            .saturating_sub(WRONG_GUESS_PENALTY * self.wrong_guesses)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.status.is_over() || self.is_paused() {
            return TickOutcome::Stopped;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.status = RoundStatus::Lost(LossReason::OutOfTime);
            return TickOutcome::Expired;
        }
        TickOutcome::Running
    }

    /// Freeze the countdown, remembering when
    ///
    /// Returns false if already paused or the round is over.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.status.is_over() || self.is_paused() {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Unfreeze the countdown, charging the whole seconds spent paused
    ///
    /// Reaching zero this way ends the round as a timeout. Returns false if
    /// not paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };

        if !self.status.is_over() {
            let elapsed = now.saturating_duration_since(paused_at);
            let charged = self.config.whole_ticks(elapsed);
            self.time_remaining = self.time_remaining.saturating_sub(charged);
            if self.time_remaining == 0 {
                self.status = RoundStatus::Lost(LossReason::OutOfTime);
            }
        }
        true
    }

    /// Letters of the word with unguessed ones hidden, space separated
    #[must_use]
    pub fn display_word(&self) -> String {
        let mut display = String::with_capacity(self.word.len() * 2);
        for (i, c) in self.word.letters().enumerate() {
            if i > 0 {
                display.push(' ');
            }
            display.push(if self.guessed.contains(&c) {
                c
            } else {
                HIDDEN_LETTER
            });
        }
        display
    }

    fn is_word_complete(&self) -> bool {
        self.word.letters().all(|c| self.guessed.contains(&c))
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub const fn guessed_letters(&self) -> &FxHashSet<char> {
        &self.guessed
    }

    #[must_use]
    pub const fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn hints_used(&self) -> u32 {
        self.hints_used
    }

    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub const fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        match self.status {
            RoundStatus::Won => GameState::Won,
            RoundStatus::Lost(_) => GameState::Lost,
            RoundStatus::InProgress if self.paused_at.is_some() => GameState::Paused,
            RoundStatus::InProgress => GameState::Active,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut guessed_letters: Vec<char> = self.guessed.iter().copied().collect();
        guessed_letters.sort_unstable();

        SessionSnapshot {
            word: self.word.text().to_string(),
            category: self.category.clone(),
            display_word: self.display_word(),
            guessed_letters,
            wrong_guesses: self.wrong_guesses,
            max_wrong_guesses: self.config.max_wrong_guesses,
            hints_used: self.hints_used,
            max_hints: self.config.max_hints,
            score: self.score,
            level: self.level,
            time_remaining_secs: self.time_remaining,
            state: self.state(),
            loss_reason: match self.status {
                RoundStatus::Lost(reason) => Some(reason),
                _ => None,
            },
        }
    }
}
