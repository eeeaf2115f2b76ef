//! Interactive terminal UI
//!
//! A ratatui front end that only reads engine snapshots and forwards key presses.

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, Statistics, run_tui};
