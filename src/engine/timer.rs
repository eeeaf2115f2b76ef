//! Countdown worker thread
//!
//! A `Countdown` owns one background thread that calls its tick callback once
//! per interval. The thread waits on a cancellation channel rather than
//! sleeping, so `stop` wakes it immediately.

use std::io;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running countdown thread
#[derive(Debug)]
pub struct Countdown {
    cancel: Sender<()>,
    finished: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Spawn the worker
    ///
    /// `on_tick` runs after every full `interval` without cancellation; the
    /// worker exits once it returns `ControlFlow::Break`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn start<F>(interval: Duration, mut on_tick: F) -> io::Result<Self>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let (finished_tx, finished_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("hangman-countdown".to_string())
            .spawn(move || {
                loop {
                    match cancel_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            if on_tick().is_break() {
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                let _ = finished_tx.send(());
            })?;

        Ok(Self {
            cancel: cancel_tx,
            finished: finished_rx,
            handle: Some(handle),
        })
    }

    /// True once the worker has exited on its own or after cancellation
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel the worker and wait up to `timeout` for it to exit
    ///
    /// Returns false if the worker did not acknowledge in time; it is then
    /// detached and exits at its next wake-up.
    pub fn stop(mut self, timeout: Duration) -> bool {
        let _ = self.cancel.send(());

        match self.finished.recv_timeout(timeout) {
            // Disconnected means the worker unwound without signalling
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(handle) = self.handle.take()
                    && handle.join().is_err()
                {
                    tracing::debug!("countdown worker panicked");
                }
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(?timeout, "countdown worker did not stop in time, detaching");
                self.handle.take();
                false
            }
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        let _ = self.cancel.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    fn counting(limit: u32) -> (Arc<AtomicU32>, impl FnMut() -> ControlFlow<()> + Send + 'static) {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let on_tick = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        (ticks, on_tick)
    }

    #[test]
    fn ticks_until_break() {
        let (ticks, on_tick) = counting(3);
        let countdown = Countdown::start(Duration::from_millis(2), on_tick).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while !countdown.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }

        assert!(countdown.is_finished());
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(countdown.stop(Duration::from_millis(100)));
    }

    #[test]
    fn stop_interrupts_long_interval() {
        let (ticks, on_tick) = counting(u32::MAX);
        let countdown = Countdown::start(Duration::from_secs(3600), on_tick).unwrap();

        let started = Instant::now();
        assert!(countdown.stop(Duration::from_secs(1)));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_ticks_after_stop() {
        let (ticks, on_tick) = counting(u32::MAX);
        let countdown = Countdown::start(Duration::from_millis(1), on_tick).unwrap();
        thread::sleep(Duration::from_millis(10));

        assert!(countdown.stop(Duration::from_secs(1)));
        let after_stop = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn dropping_handle_cancels_worker() {
        let (ticks, on_tick) = counting(u32::MAX);
        let countdown = Countdown::start(Duration::from_millis(1), on_tick).unwrap();
        drop(countdown);

        thread::sleep(Duration::from_millis(20));
        let settled = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.load(Ordering::SeqCst), settled);
    }

    #[test]
    fn panicking_tick_is_contained() {
        let countdown = Countdown::start(Duration::from_millis(1), || -> ControlFlow<()> {
            panic!("tick failure")
        })
        .unwrap();
        thread::sleep(Duration::from_millis(20));
        assert!(countdown.stop(Duration::from_secs(1)));
    }
}
