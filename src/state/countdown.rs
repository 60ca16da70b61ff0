use super::SessionEngine;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// A running countdown. Dropping the handle cancels the task, so an owner
/// that swaps in a new countdown always cancels the old one.
#[derive(Debug)]
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Tick every `period`, reporting `from - 1` down to `0`. The zero tick is
    /// emitted, then the task ends. Must be called inside a tokio runtime.
    pub fn start<F>(from: u32, period: Duration, on_tick: F) -> Self
    where
        F: Fn(u32) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            let mut remaining = from;
            while remaining > 0 {
                interval.tick().await;
                remaining -= 1;
                on_tick(remaining);
            }
            tracing::debug!("Countdown finished");
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl SessionEngine {
    /// Start the discussion countdown, cancelling any countdown already
    /// running.
    pub fn start_countdown<F>(&mut self, on_tick: F)
    where
        F: Fn(u32) + Send + 'static,
    {
        let countdown = Countdown::start(
            self.settings.countdown_seconds,
            self.settings.tick_interval,
            on_tick,
        );
        if self.countdown.replace(countdown).is_some() {
            tracing::debug!("Replaced running countdown");
        }
        tracing::info!(
            "Countdown started from {}s",
            self.settings.countdown_seconds
        );
    }

    /// Cancel the countdown. Safe to call when none is running.
    pub fn stop_countdown(&mut self) {
        if self.countdown.take().is_some() {
            tracing::debug!("Countdown stopped");
        }
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_running)
    }
}
