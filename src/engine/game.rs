//! Thread-safe game engine
//!
//! `GameEngine` owns the session behind a single mutex shared with the
//! countdown worker. Every operation and every tick takes that lock, so the
//! timer and the player never observe or produce a half-applied update.
//!
//! Each started countdown is tagged with an epoch. Stopping a countdown bumps
//! the epoch first, so a worker that wakes up late finds itself stale and exits
//! without touching the session.

use super::clock::{Clock, MonotonicClock};
use super::config::GameConfig;
use super::session::{
    GameState, GuessOutcome, HintOutcome, LossReason, RoundStatus, Session, SessionSnapshot,
    TickOutcome,
};
use super::timer::Countdown;
use crate::core::Dictionary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Session plus the epoch of the countdown allowed to tick it
#[derive(Debug)]
struct Shared {
    session: Session,
    epoch: u64,
}

#[derive(Debug, Default)]
struct TimerSlot {
    countdown: Option<Countdown>,
    closed: bool,
}

/// Hangman engine driving rounds, hints, scoring and the countdown
pub struct GameEngine {
    dictionary: Arc<Dictionary>,
    config: GameConfig,
    clock: Arc<dyn Clock>,
    shared: Arc<Mutex<Shared>>,
    timer: Mutex<TimerSlot>,
    rng: Mutex<StdRng>,
}

impl GameEngine {
    /// Create an engine and start its first round
    pub fn new(dictionary: impl Into<Arc<Dictionary>>, config: GameConfig) -> Self {
        Self::with_parts(
            dictionary,
            config,
            StdRng::from_os_rng(),
            Arc::new(MonotonicClock),
        )
    }

    /// Create an engine with an explicit random source and clock
    pub fn with_parts(
        dictionary: impl Into<Arc<Dictionary>>,
        config: GameConfig,
        mut rng: StdRng,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let dictionary = dictionary.into();
        let (word, category) = dictionary.pick_random_with(&mut rng);
        let session = Session::new(config, word.clone(), category);

        let engine = Self {
            dictionary,
            config,
            clock,
            shared: Arc::new(Mutex::new(Shared { session, epoch: 0 })),
            timer: Mutex::new(TimerSlot::default()),
            rng: Mutex::new(rng),
        };

        let mut slot = engine.lock_timer();
        let epoch = engine.lock_shared().epoch;
        engine.spawn_countdown(&mut slot, epoch);
        drop(slot);

        engine
    }

    /// Start a new round with a freshly drawn word
    ///
    /// Score and level carry over; the previous countdown is cancelled before
    /// the new one starts.
    pub fn reset(&self) {
        let mut slot = self.lock_timer();
        self.stop_countdown(&mut slot);

        let (word, category) = {
            let mut rng = lock(&self.rng);
            let (word, category) = self.dictionary.pick_random_with(&mut *rng);
            (word.clone(), category.to_string())
        };

        let epoch = {
            let mut shared = self.lock_shared();
            debug!(word = %word, category = %category, "starting round");
            shared.session.start_round(word, category);
            shared.epoch += 1;
            shared.epoch
        };

        self.spawn_countdown(&mut slot, epoch);
    }

    /// Submit a letter, reporting why it was ignored if it was
    pub fn submit(&self, letter: char) -> GuessOutcome {
        let mut shared = self.lock_shared();
        let outcome = shared.session.guess(letter);
        debug!(%letter, ?outcome, "guess");
        if !matches!(outcome, GuessOutcome::Rejected(_)) {
            log_round_end(&shared.session);
        }
        outcome
    }

    /// Submit a letter; true if it is in the word
    pub fn guess(&self, letter: char) -> bool {
        self.submit(letter).is_hit()
    }

    /// Reveal and submit the first unguessed letter, if the budget allows
    pub fn hint(&self) -> HintOutcome {
        let mut shared = self.lock_shared();
        let outcome = shared.session.hint();
        debug!(?outcome, hints_used = shared.session.hints_used(), "hint");
        if matches!(outcome, HintOutcome::Revealed(_)) {
            log_round_end(&shared.session);
        }
        outcome
    }

    /// The letter a hint would reveal, without using one
    #[must_use]
    pub fn hint_letter(&self) -> Option<char> {
        self.lock_shared().session.hint_letter()
    }

    #[must_use]
    pub fn can_use_hint(&self) -> bool {
        self.lock_shared().session.can_use_hint()
    }

    /// Freeze the countdown; no-op if already paused or the round is over
    pub fn pause(&self) -> bool {
        let mut slot = self.lock_timer();
        {
            let mut shared = self.lock_shared();
            if !shared.session.pause(self.clock.now()) {
                return false;
            }
            debug!(
                time_remaining = shared.session.time_remaining(),
                "paused"
            );
        }
        self.stop_countdown(&mut slot);
        true
    }

    /// Resume the countdown, charging the time spent paused
    pub fn resume(&self) -> bool {
        let mut slot = self.lock_timer();
        let epoch = {
            let mut shared = self.lock_shared();
            if !shared.session.resume(self.clock.now()) {
                return false;
            }
            let session = &shared.session;
            debug!(time_remaining = session.time_remaining(), "resumed");
            if session.status().is_over() {
                if session.status() == RoundStatus::Lost(LossReason::OutOfTime) {
                    info!(word = %session.word(), "round lost: time ran out while paused");
                }
                return true;
            }
            shared.epoch += 1;
            shared.epoch
        };
        self.spawn_countdown(&mut slot, epoch);
        true
    }

    /// Stop the countdown for good
    ///
    /// Waits at most `shutdown_timeout` for the worker; safe to call repeatedly.
    /// Later rounds still play, but without a countdown.
    pub fn shutdown(&self) {
        let mut slot = self.lock_timer();
        if slot.closed {
            return;
        }
        slot.closed = true;
        self.stop_countdown(&mut slot);
        debug!("engine shut down");
    }

    #[must_use]
    pub fn display_word(&self) -> String {
        self.lock_shared().session.display_word()
    }

    #[must_use]
    pub fn word(&self) -> String {
        self.lock_shared().session.word().text().to_string()
    }

    #[must_use]
    pub fn category(&self) -> String {
        self.lock_shared().session.category().to_string()
    }

    /// Copy of the letters tried this round
    #[must_use]
    pub fn guessed_letters(&self) -> FxHashSet<char> {
        self.lock_shared().session.guessed_letters().clone()
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> u32 {
        self.lock_shared().session.wrong_guesses()
    }

    #[must_use]
    pub const fn max_wrong_guesses(&self) -> u32 {
        self.config.max_wrong_guesses
    }

    #[must_use]
    pub fn wrong_guesses_remaining(&self) -> u32 {
        self.config
            .max_wrong_guesses
            .saturating_sub(self.wrong_guesses())
    }

    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.lock_shared().session.hints_used()
    }

    #[must_use]
    pub const fn max_hints(&self) -> u32 {
        self.config.max_hints
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.config.max_hints.saturating_sub(self.hints_used())
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.lock_shared().session.score()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.lock_shared().session.level()
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.lock_shared().session.time_remaining()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.lock_shared().session.status().is_over()
    }

    #[must_use]
    pub fn is_game_won(&self) -> bool {
        self.lock_shared().session.status() == RoundStatus::Won
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.lock_shared().session.is_paused()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.lock_shared().session.state()
    }

    #[must_use]
    pub fn loss_reason(&self) -> Option<LossReason> {
        match self.lock_shared().session.status() {
            RoundStatus::Lost(reason) => Some(reason),
            _ => None,
        }
    }

    /// Every observable field read under one lock
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock_shared().session.snapshot()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        lock(&self.shared)
    }

    fn lock_timer(&self) -> MutexGuard<'_, TimerSlot> {
        lock(&self.timer)
    }

    fn bump_epoch(&self) {
        self.lock_shared().epoch += 1;
    }

    /// Invalidate and cancel the running countdown, if any
    fn stop_countdown(&self, slot: &mut TimerSlot) {
        self.bump_epoch();
        if let Some(countdown) = slot.countdown.take() {
            countdown.stop(self.config.shutdown_timeout);
        }
    }

    fn spawn_countdown(&self, slot: &mut TimerSlot, epoch: u64) {
        if slot.closed {
            warn!("engine is shut down, round will run without a countdown");
            return;
        }

        let shared = Arc::clone(&self.shared);
        match Countdown::start(self.config.tick_interval, move || on_tick(&shared, epoch)) {
            Ok(countdown) => slot.countdown = Some(countdown),
            Err(err) => error!(%err, "failed to start countdown"),
        }
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("dictionary_words", &self.dictionary.len())
            .finish_non_exhaustive()
    }
}

fn on_tick(shared: &Mutex<Shared>, epoch: u64) -> ControlFlow<()> {
    let mut shared = lock(shared);
    if shared.epoch != epoch {
        return ControlFlow::Break(());
    }

    match shared.session.tick() {
        TickOutcome::Running => ControlFlow::Continue(()),
        TickOutcome::Expired => {
            info!(word = %shared.session.word(), "round lost: time ran out");
            ControlFlow::Break(())
        }
        TickOutcome::Stopped => ControlFlow::Break(()),
    }
}

/// Log the outcome of a round a guess has just finished
fn log_round_end(session: &Session) {
    match session.status() {
        RoundStatus::Won => info!(
            word = %session.word(),
            score = session.score(),
            level = session.level(),
            "round won"
        ),
        RoundStatus::Lost(LossReason::OutOfGuesses) => {
            info!(word = %session.word(), "round lost: out of guesses");
        }
        RoundStatus::Lost(LossReason::OutOfTime) | RoundStatus::InProgress => {}
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::engine::session::RejectReason;
    use std::thread;
    use std::time::{Duration, Instant};

    const FAST_TICK: Duration = Duration::from_millis(5);

    fn single_word(word: &str, category: &str) -> Dictionary {
        Dictionary::new([(word, category)]).unwrap()
    }

    fn engine_for(word: &str, config: GameConfig) -> GameEngine {
        GameEngine::with_parts(
            single_word(word, "Programming Languages"),
            config,
            StdRng::seed_from_u64(1),
            Arc::new(MonotonicClock),
        )
    }

    fn engine_with_clock(word: &str, clock: &Arc<ManualClock>) -> GameEngine {
        let clock: Arc<dyn Clock> = clock.clone();
        GameEngine::with_parts(
            single_word(word, "Programming Languages"),
            GameConfig::default(),
            StdRng::seed_from_u64(1),
            clock,
        )
    }

    fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        condition()
    }

    #[test]
    fn new_engine_starts_active_round() {
        let engine = engine_for("JAVA", GameConfig::default());
        assert_eq!(engine.word(), "JAVA");
        assert_eq!(engine.category(), "Programming Languages");
        assert_eq!(engine.display_word(), "_ _ _ _");
        assert_eq!(engine.state(), GameState::Active);
        assert_eq!(engine.time_remaining(), 60);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 0);
        assert_eq!(engine.max_wrong_guesses(), 6);
        assert_eq!(engine.max_hints(), 3);
    }

    #[test]
    fn java_round_is_won_after_v() {
        let engine = engine_for("JAVA", GameConfig::default());
        assert!(engine.guess('J'));
        assert!(engine.guess('a'));
        assert!(!engine.is_game_over());
        assert!(engine.guess('V'));

        assert_eq!(engine.display_word(), "J A V A");
        assert!(engine.is_game_over());
        assert!(engine.is_game_won());
        assert_eq!(engine.level(), 1);

        for c in ['X', 'Q', 'Z'] {
            assert_eq!(
                engine.submit(c),
                GuessOutcome::Rejected(RejectReason::RoundOver)
            );
        }
        assert_eq!(engine.wrong_guesses(), 0);
        let guessed = engine.guessed_letters();
        assert!(['J', 'A', 'V'].iter().all(|c| guessed.contains(c)));
        assert!(!guessed.contains(&'X'));
    }

    #[test]
    fn six_misses_lose_without_score() {
        let engine = engine_for("GO", GameConfig::default());
        for c in ['B', 'C', 'D', 'F', 'H', 'K'] {
            assert!(!engine.guess(c));
        }
        assert!(engine.is_game_over());
        assert!(!engine.is_game_won());
        assert_eq!(engine.loss_reason(), Some(LossReason::OutOfGuesses));
        assert_eq!(engine.wrong_guesses(), 6);
        assert_eq!(engine.wrong_guesses_remaining(), 0);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn quick_win_scores_full_time_bonus() {
        let engine = engine_for("GO", GameConfig::default());
        engine.guess('G');
        engine.guess('O');
        // Well inside the first second, so the clock still reads 60
        assert_eq!(engine.score(), 220);
    }

    #[test]
    fn score_and_level_accumulate_across_resets() {
        let engine = engine_for("GO", GameConfig::default());
        engine.guess('G');
        engine.guess('O');
        let first = engine.score();

        engine.reset();
        assert_eq!(engine.state(), GameState::Active);
        assert!(engine.guessed_letters().is_empty());
        assert_eq!(engine.score(), first);

        engine.guess('G');
        engine.guess('O');
        assert_eq!(engine.level(), 2);
        assert!(engine.score() > first);
    }

    #[test]
    fn returned_letters_are_a_copy() {
        let engine = engine_for("JAVA", GameConfig::default());
        engine.guess('J');
        let mut letters = engine.guessed_letters();
        letters.insert('Z');
        assert!(!engine.guessed_letters().contains(&'Z'));
    }

    #[test]
    fn hints_are_capped_per_round() {
        let engine = engine_for("ENCAPSULATION", GameConfig::default());
        assert_eq!(engine.hint_letter(), Some('E'));
        assert_eq!(engine.hint(), HintOutcome::Revealed('E'));
        assert_eq!(engine.hint(), HintOutcome::Revealed('N'));
        assert_eq!(engine.hint(), HintOutcome::Revealed('C'));
        assert!(!engine.can_use_hint());
        assert_eq!(engine.hint(), HintOutcome::BudgetExhausted);
        assert_eq!(engine.hints_used(), 3);
        assert_eq!(engine.hints_remaining(), 0);
        assert_eq!(engine.wrong_guesses(), 0);

        engine.reset();
        assert_eq!(engine.hints_used(), 0);
        assert!(engine.can_use_hint());
    }

    #[test]
    fn hint_rejected_once_round_is_over() {
        let engine = engine_for("GO", GameConfig::default());
        engine.guess('G');
        engine.guess('O');
        assert!(engine.is_game_won());
        assert!(!engine.can_use_hint());
        assert_eq!(engine.hint(), HintOutcome::RoundOver);
        assert_eq!(engine.hints_used(), 0);
    }

    #[test]
    fn timer_expiry_ends_round_as_loss() {
        let config = GameConfig::default()
            .with_time_limit(3)
            .with_tick_interval(FAST_TICK);
        let engine = engine_for("JAVA", config);

        assert!(wait_until(Duration::from_secs(5), || engine.is_game_over()));
        assert_eq!(engine.time_remaining(), 0);
        assert!(!engine.is_game_won());
        assert_eq!(engine.loss_reason(), Some(LossReason::OutOfTime));
        assert_eq!(engine.submit('J'), GuessOutcome::Rejected(RejectReason::RoundOver));
    }

    #[test]
    fn timer_stops_after_win() {
        let config = GameConfig::default()
            .with_time_limit(1_000)
            .with_tick_interval(FAST_TICK);
        let engine = engine_for("GO", config);
        engine.guess('G');
        engine.guess('O');

        let frozen = engine.time_remaining();
        thread::sleep(FAST_TICK * 10);
        assert_eq!(engine.time_remaining(), frozen);
    }

    #[test]
    fn pause_freezes_the_countdown() {
        let config = GameConfig::default()
            .with_time_limit(1_000)
            .with_tick_interval(FAST_TICK);
        let engine = engine_for("JAVA", config);

        assert!(engine.pause());
        assert!(!engine.pause());
        assert_eq!(engine.state(), GameState::Paused);

        let frozen = engine.time_remaining();
        thread::sleep(FAST_TICK * 10);
        assert_eq!(engine.time_remaining(), frozen);
    }

    #[test]
    fn resume_charges_floor_of_paused_seconds() {
        let clock = Arc::new(ManualClock::new());
        let engine = engine_with_clock("JAVA", &clock);

        assert!(!engine.resume());
        assert!(engine.pause());
        let before = engine.time_remaining();
        clock.advance(Duration::from_millis(7_900));
        assert!(engine.resume());

        assert_eq!(engine.time_remaining(), before - 7);
        assert_eq!(engine.state(), GameState::Active);
        assert!(!engine.resume());
    }

    #[test]
    fn long_pause_times_out_instead_of_going_negative() {
        let clock = Arc::new(ManualClock::new());
        let engine = engine_with_clock("JAVA", &clock);

        engine.pause();
        clock.advance(Duration::from_secs(3_600));
        engine.resume();

        assert_eq!(engine.time_remaining(), 0);
        assert!(engine.is_game_over());
        assert_eq!(engine.loss_reason(), Some(LossReason::OutOfTime));
    }

    #[test]
    fn guesses_accepted_while_paused() {
        let engine = engine_for("JAVA", GameConfig::default());
        engine.pause();
        assert!(engine.guess('J'));
        assert_eq!(engine.display_word(), "J _ _ _");
    }

    #[test]
    fn reset_while_paused_starts_running_round() {
        let config = GameConfig::default()
            .with_time_limit(1_000)
            .with_tick_interval(FAST_TICK);
        let engine = engine_for("JAVA", config);
        engine.pause();
        engine.reset();

        assert!(!engine.is_paused());
        assert!(wait_until(Duration::from_secs(5), || {
            engine.time_remaining() < 1_000
        }));
    }

    #[test]
    fn repeated_resets_keep_a_single_countdown() {
        let config = GameConfig::default()
            .with_time_limit(10_000)
            .with_tick_interval(Duration::from_millis(10));
        let engine = engine_for("JAVA", config);
        for _ in 0..20 {
            engine.reset();
        }

        thread::sleep(Duration::from_millis(200));
        let elapsed_ticks = 10_000 - engine.time_remaining();
        // Twenty live workers would have burned hundreds of ticks
        assert!(elapsed_ticks <= 25, "ticked {elapsed_ticks} times");
    }

    #[test]
    fn shutdown_is_idempotent_and_stops_ticks() {
        let config = GameConfig::default()
            .with_time_limit(1_000)
            .with_tick_interval(FAST_TICK);
        let engine = engine_for("JAVA", config);
        thread::sleep(FAST_TICK * 4);

        engine.shutdown();
        engine.shutdown();

        let after = engine.time_remaining();
        thread::sleep(FAST_TICK * 10);
        assert_eq!(engine.time_remaining(), after);
        assert!(!engine.is_game_over());
    }

    #[test]
    fn shutdown_from_terminal_state() {
        let engine = engine_for("GO", GameConfig::default());
        for c in ['B', 'C', 'D', 'F', 'H', 'K'] {
            engine.guess(c);
        }
        engine.shutdown();
        engine.shutdown();
        assert!(engine.is_game_over());
    }

    #[test]
    fn reset_after_shutdown_plays_without_countdown() {
        let config = GameConfig::default()
            .with_time_limit(1_000)
            .with_tick_interval(FAST_TICK);
        let engine = engine_for("JAVA", config);
        engine.shutdown();
        engine.reset();

        thread::sleep(FAST_TICK * 10);
        assert_eq!(engine.time_remaining(), 1_000);
        assert!(engine.guess('J'));
    }

    #[test]
    fn snapshot_matches_accessors() {
        let engine = engine_for("JAVA", GameConfig::default());
        engine.guess('A');
        engine.guess('X');

        let snap = engine.snapshot();
        assert_eq!(snap.word, engine.word());
        assert_eq!(snap.display_word, "_ A _ A");
        assert_eq!(snap.guessed_letters, vec!['A', 'X']);
        assert_eq!(snap.wrong_guesses, 1);
        assert_eq!(snap.state, GameState::Active);
        assert_eq!(snap.loss_reason, None);
    }

    #[test]
    fn concurrent_guesses_and_ticks_stay_consistent() {
        let config = GameConfig::default()
            .with_time_limit(10_000)
            .with_tick_interval(Duration::from_millis(1));
        let engine = Arc::new(engine_for("POLYMORPHISM", config));

        let workers: Vec<_> = ['P', 'O', 'L', 'Y', 'M', 'R', 'H', 'I', 'S']
            .into_iter()
            .map(|c| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    engine.guess(c);
                    let _ = engine.snapshot();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert!(engine.is_game_won());
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.wrong_guesses(), 0);
        let frozen = engine.time_remaining();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(engine.time_remaining(), frozen);
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GameEngine>();
    }
}
