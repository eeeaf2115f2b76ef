//! Game engine
//!
//! The round/session state machine, its countdown worker, and the
//! thread-safe facade the presentation layer talks to.

mod clock;
mod config;
mod game;
mod session;
mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{BASE_SCORE, GameConfig, TIME_BONUS_PER_SECOND, WRONG_GUESS_PENALTY};
pub use game::GameEngine;
pub use session::{
    GameState, GuessOutcome, HIDDEN_LETTER, HintOutcome, LossReason, RejectReason, RoundStatus,
    Session, SessionSnapshot, TickOutcome,
};
pub use timer::Countdown;
