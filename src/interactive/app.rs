//! TUI application state and logic

use crate::engine::{GameEngine, GameState, GuessOutcome, HintOutcome, LossReason, RejectReason};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Redraw interval; keeps the countdown display live without input
const FRAME_INTERVAL: Duration = Duration::from_millis(200);

/// Messages kept on screen
const MAX_MESSAGES: usize = 5;

/// Application state
pub struct App<'a> {
    pub engine: &'a GameEngine,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    round_recorded: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Results of the rounds finished in this session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub rounds_played: usize,
    pub rounds_won: usize,
    pub timeouts: usize,
}

impl Statistics {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.rounds_won as f64 / self.rounds_played as f64 * 100.0
        }
    }
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(engine: &'a GameEngine) -> Self {
        Self {
            engine,
            messages: vec![
                Message {
                    text: "Welcome! Type letters to guess the hidden word.".to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "? = hint, Space = pause, Esc = quit".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            stats: Statistics::default(),
            should_quit: false,
            round_recorded: false,
        }
    }

    /// Dispatch one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.toggle_pause(),
            KeyCode::Char('?') => self.use_hint(),
            KeyCode::Enter => {
                if self.engine.is_game_over() {
                    self.new_round();
                }
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => self.guess(c),
            _ => {}
        }
        self.sync_round_end();
    }

    /// Pick up round endings that happened without input (timeouts)
    pub fn sync_round_end(&mut self) {
        if self.round_recorded {
            return;
        }

        let snapshot = self.engine.snapshot();
        if !snapshot.is_game_over() {
            return;
        }

        self.round_recorded = true;
        self.stats.rounds_played += 1;
        match (snapshot.state, snapshot.loss_reason) {
            (GameState::Won, _) => {
                self.stats.rounds_won += 1;
                self.add_message(
                    &format!(
                        "🎉 Solved {}! Score {} - Level {}",
                        snapshot.word, snapshot.score, snapshot.level
                    ),
                    MessageStyle::Success,
                );
            }
            (_, Some(LossReason::OutOfTime)) => {
                self.stats.timeouts += 1;
                self.add_message(
                    &format!("⏰ Time's up! The word was {}", snapshot.word),
                    MessageStyle::Error,
                );
            }
            _ => self.add_message(
                &format!("💀 Hanged! The word was {}", snapshot.word),
                MessageStyle::Error,
            ),
        }
        self.add_message("Press Enter for a new round or Esc to quit.", MessageStyle::Info);
    }

    pub fn new_round(&mut self) {
        self.engine.reset();
        self.round_recorded = false;
        self.messages.clear();
        self.add_message("New round started!", MessageStyle::Info);
    }

    fn guess(&mut self, letter: char) {
        // Pausing only freezes the engine's clock; input is held back here
        if self.engine.is_paused() {
            self.add_message("Paused - press Space to resume.", MessageStyle::Error);
            return;
        }

        let letter = letter.to_ascii_uppercase();
        match self.engine.submit(letter) {
            GuessOutcome::Hit => {
                self.add_message(&format!("✓ {letter} is in the word"), MessageStyle::Success);
            }
            GuessOutcome::Miss => {
                self.add_message(&format!("✗ No {letter}"), MessageStyle::Error);
            }
            GuessOutcome::Rejected(RejectReason::AlreadyGuessed) => {
                self.add_message(&format!("Already tried {letter}"), MessageStyle::Info);
            }
            GuessOutcome::Rejected(RejectReason::NotALetter | RejectReason::RoundOver) => {}
        }
    }

    fn use_hint(&mut self) {
        if self.engine.is_paused() {
            self.add_message("Paused - press Space to resume.", MessageStyle::Error);
            return;
        }

        match self.engine.hint() {
            HintOutcome::Revealed(letter) => self.add_message(
                &format!(
                    "💡 Revealed {letter} ({} hints left)",
                    self.engine.hints_remaining()
                ),
                MessageStyle::Success,
            ),
            HintOutcome::BudgetExhausted => {
                self.add_message("No hints left this round!", MessageStyle::Error);
            }
            HintOutcome::NothingToReveal => {
                self.add_message("Nothing left to reveal!", MessageStyle::Error);
            }
            HintOutcome::RoundOver => {}
        }
    }

    fn toggle_pause(&mut self) {
        if self.engine.is_paused() {
            if self.engine.resume() {
                self.add_message("▶ Resumed", MessageStyle::Info);
            }
        } else if self.engine.pause() {
            self.add_message("⏸ Paused - the clock still charges paused time", MessageStyle::Info);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.sync_round_end();
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(FRAME_INTERVAL)?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dictionary;
    use crate::engine::GameConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn engine(word: &str) -> GameEngine {
        GameEngine::with_parts(
            Dictionary::new([(word, "Programming Languages")]).unwrap(),
            GameConfig::default(),
            StdRng::seed_from_u64(3),
            Arc::new(crate::engine::MonotonicClock),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn letters_are_guessed_uppercase() {
        let engine = engine("JAVA");
        let mut app = App::new(&engine);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(engine.display_word(), "J _ _ _");
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Success);
    }

    #[test]
    fn win_is_recorded_once() {
        let engine = engine("GO");
        let mut app = App::new(&engine);
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('x'));
        app.sync_round_end();

        assert_eq!(app.stats.rounds_played, 1);
        assert_eq!(app.stats.rounds_won, 1);
        assert!((app.stats.win_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn enter_starts_new_round_only_when_over() {
        let engine = engine("GO");
        let mut app = App::new(&engine);
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(engine.display_word(), "G _");

        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(engine.display_word(), "_ _");
        assert_eq!(engine.level(), 1);
        assert_eq!(app.stats.rounds_played, 1);
    }

    #[test]
    fn paused_game_holds_back_guesses() {
        let engine = engine("JAVA");
        let mut app = App::new(&engine);
        press(&mut app, KeyCode::Char(' '));
        assert!(engine.is_paused());

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('?'));
        assert!(engine.guessed_letters().is_empty());
        assert_eq!(engine.hints_used(), 0);

        press(&mut app, KeyCode::Char(' '));
        assert!(!engine.is_paused());
    }

    #[test]
    fn hint_key_reveals_letter() {
        let engine = engine("JAVA");
        let mut app = App::new(&engine);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(engine.display_word(), "J _ _ _");
        assert_eq!(engine.hints_used(), 1);
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let engine = engine("JAVA");
        let mut app = App::new(&engine);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = App::new(&engine);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(engine.guessed_letters().is_empty());
    }

    #[test]
    fn messages_are_capped() {
        let engine = engine("JAVA");
        let mut app = App::new(&engine);
        for i in 0..20 {
            app.add_message(&format!("msg {i}"), MessageStyle::Info);
        }
        assert_eq!(app.messages.len(), MAX_MESSAGES);
        assert_eq!(app.messages.last().unwrap().text, "msg 19");
    }
}
