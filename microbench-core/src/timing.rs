// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Pause/resume stopwatch with microsecond resolution.
//!
//! A benchmark body brackets its measured region with `start_timing` /
//! `stop_timing`; the runner brackets the whole trial with
//! `restart_timing` / `stop_timing`. Only time spent inside open intervals
//! accumulates.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A source of monotonic timestamps in microseconds.
pub trait Clock {
    /// Current time in microseconds relative to an arbitrary fixed origin.
    fn now_micros(&self) -> i64;
}

/// Process-relative monotonic clock backed by `Instant`.
///
/// Unaffected by wall-clock adjustments.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> i64 {
        self.origin.elapsed().as_micros() as i64
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can hand one clone to the harness
/// and advance another from inside a benchmark body.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `micros`.
    pub fn advance(&self, micros: i64) {
        self.now.set(self.now.get() + micros);
    }

    /// Set the absolute time.
    pub fn set(&self, micros: i64) {
        self.now.set(micros);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> i64 {
        self.now.get()
    }
}

/// Accumulating stopwatch.
pub struct TimingController {
    clock: Box<dyn Clock>,
    accumulated_micros: i64,
    /// Start of the open interval; `None` while stopped.
    interval_start: Option<i64>,
}

impl TimingController {
    /// Create a stopped controller on the process monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(MonotonicClock::new()))
    }

    /// Create a stopped controller reading from `clock`.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            accumulated_micros: 0,
            interval_start: None,
        }
    }

    /// Discard accumulated time and open a fresh interval.
    pub fn restart_timing(&mut self) {
        self.accumulated_micros = 0;
        self.interval_start = Some(self.clock.now_micros());
    }

    /// Open an interval at the current time.
    ///
    /// Not guarded: if an interval is already open its start point is
    /// replaced and the time since that start is lost.
    pub fn start_timing(&mut self) {
        self.interval_start = Some(self.clock.now_micros());
    }

    /// Close the open interval and add it to the total. No-op when stopped.
    pub fn stop_timing(&mut self) {
        if let Some(start) = self.interval_start.take() {
            self.accumulated_micros += self.clock.now_micros() - start;
        }
    }

    /// Whether an interval is currently open.
    pub fn is_running(&self) -> bool {
        self.interval_start.is_some()
    }

    /// Total microseconds accumulated since the last restart.
    pub fn accumulated_micros(&self) -> i64 {
        self.accumulated_micros
    }

    /// Accumulated time in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.accumulated_micros as f64 * 1e-6
    }
}

impl Default for TimingController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimingController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimingController")
            .field("accumulated_micros", &self.accumulated_micros)
            .field("interval_start", &self.interval_start)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> (ManualClock, TimingController) {
        let clock = ManualClock::new();
        clock.set(1_000);
        let timing = TimingController::with_clock(Box::new(clock.clone()));
        (clock, timing)
    }

    #[test]
    fn test_new_controller_is_stopped() {
        let (_, timing) = manual();
        assert!(!timing.is_running());
        assert_eq!(timing.accumulated_micros(), 0);
    }

    #[test]
    fn test_restart_then_stop_is_zero() {
        let (_, mut timing) = manual();
        timing.restart_timing();
        timing.stop_timing();
        assert_eq!(timing.accumulated_micros(), 0);
        assert!(!timing.is_running());
    }

    #[test]
    fn test_restart_discards_previous_total() {
        let (clock, mut timing) = manual();
        timing.restart_timing();
        clock.advance(250);
        timing.stop_timing();
        assert_eq!(timing.accumulated_micros(), 250);

        timing.restart_timing();
        assert_eq!(timing.accumulated_micros(), 0);
        assert!(timing.is_running());
    }

    #[test]
    fn test_double_stop_is_idempotent() {
        let (clock, mut timing) = manual();
        timing.restart_timing();
        clock.advance(400);
        timing.stop_timing();
        clock.advance(10_000);
        timing.stop_timing();
        assert_eq!(timing.accumulated_micros(), 400);
    }

    #[test]
    fn test_pause_excludes_untimed_region() {
        let (clock, mut timing) = manual();
        timing.restart_timing();
        clock.advance(100);
        timing.stop_timing();
        clock.advance(5_000); // setup
        timing.start_timing();
        clock.advance(300);
        timing.stop_timing();
        assert_eq!(timing.accumulated_micros(), 400);
    }

    #[test]
    fn test_start_while_running_discards_open_interval() {
        let (clock, mut timing) = manual();
        timing.restart_timing();
        clock.advance(700);
        timing.start_timing();
        clock.advance(50);
        timing.stop_timing();
        assert_eq!(timing.accumulated_micros(), 50);
    }

    #[test]
    fn test_clock_at_zero_still_counts_as_running() {
        let clock = ManualClock::new();
        let mut timing = TimingController::with_clock(Box::new(clock.clone()));
        timing.start_timing();
        assert!(timing.is_running());
        clock.advance(20);
        timing.stop_timing();
        assert_eq!(timing.accumulated_micros(), 20);
    }

    #[test]
    fn test_elapsed_seconds() {
        let (clock, mut timing) = manual();
        timing.restart_timing();
        clock.advance(1_500_000);
        timing.stop_timing();
        assert!((timing.elapsed_seconds() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_clock_measures_sleep() {
        let mut timing = TimingController::new();
        timing.restart_timing();
        std::thread::sleep(std::time::Duration::from_millis(5));
        timing.stop_timing();
        assert!(timing.accumulated_micros() >= 5_000);
    }
}
