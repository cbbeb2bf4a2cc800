//! Tick drivers
//!
//! The controller never talks to a clock directly. It asks a `TickScheduler`
//! to start or stop a periodic tick, and whoever owns the event loop calls
//! `GameController::tick` when the driver fires.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// A single periodic tick source
pub trait TickScheduler {
    /// Begin ticking every `period`, the first tick `first_tick_after` from
    /// now. Callers stop any running driver first.
    fn start(&mut self, first_tick_after: Duration, period: Duration);

    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// Tick driver backed by a tokio interval
#[derive(Debug, Default)]
pub struct TokioTicker {
    interval: Option<Interval>,
}

impl TokioTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves on the next tick; never resolves while stopped
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickScheduler for TokioTicker {
    fn start(&mut self, first_tick_after: Duration, period: Duration) {
        let mut interval = interval_at(Instant::now() + first_tick_after, period);
        // A slow frame should not be followed by a burst of catch-up moves
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}

/// Scheduler for tests and headless runs: records what it was asked to do
/// and leaves firing to the caller.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    running: bool,
    /// `(first_tick_after, period)` of every start, oldest first
    pub starts: Vec<(Duration, Duration)>,
    pub stops: usize,
    /// Starts issued while a driver was already live
    pub overlapping_starts: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, first_tick_after: Duration, period: Duration) {
        if self.running {
            self.overlapping_starts += 1;
        }
        self.running = true;
        self.starts.push((first_tick_after, period));
    }

    fn stop(&mut self) {
        if self.running {
            self.stops += 1;
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
