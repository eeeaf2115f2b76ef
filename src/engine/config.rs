//! Fixed game constants
//!
//! The binary always plays with `GameConfig::default()`; the builder methods
//! exist so tests can run the countdown at millisecond speed.

use std::time::Duration;

/// Points for any won round
pub const BASE_SCORE: u32 = 100;

/// Bonus points per second left on the clock
pub const TIME_BONUS_PER_SECOND: u32 = 2;

/// Points deducted per wrong guess
pub const WRONG_GUESS_PENALTY: u32 = 10;

/// Per-round limits and timer pacing
///
/// One second of game time is one `tick_interval` of wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub max_wrong_guesses: u32,
    pub max_hints: u32,
    pub time_limit_secs: u32,
    pub tick_interval: Duration,
    pub shutdown_timeout: Duration,
}

impl GameConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_wrong_guesses: 6,
            max_hints: 3,
            time_limit_secs: 60,
            tick_interval: Duration::from_secs(1),
            shutdown_timeout: Duration::from_secs(1),
        }
    }

    #[must_use]
    pub const fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    #[must_use]
    pub const fn with_time_limit(mut self, time_limit_secs: u32) -> Self {
        self.time_limit_secs = time_limit_secs;
        self
    }

    /// Whole ticks contained in `elapsed`, saturating at `u32::MAX`
    #[must_use]
    pub fn whole_ticks(&self, elapsed: Duration) -> u32 {
        let tick = self.tick_interval.as_nanos().max(1);
        u32::try_from(elapsed.as_nanos() / tick).unwrap_or(u32::MAX)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
