// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Harness context.
//!
//! All mutable harness state lives here and is threaded explicitly:
//! the [`Harness`] owns the registry and the per-trial state, and a
//! `&mut Trial` is handed to every benchmark body.

use std::io::Write;

use crate::config::RunnerConfig;
use crate::counters::ThroughputCounters;
use crate::error::{BenchError, BenchResult};
use crate::registry::{BenchFn, BenchmarkRegistry, MATCH_ALL};
use crate::runner::{BenchmarkReport, Runner};
use crate::timing::{Clock, TimingController};

/// State visible to a benchmark body during a trial.
#[derive(Debug, Default)]
pub struct Trial {
    timing: TimingController,
    counters: ThroughputCounters,
}

impl Trial {
    /// Trial state on the process monotonic clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trial state reading time from `clock`.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            timing: TimingController::with_clock(clock),
            counters: ThroughputCounters::new(),
        }
    }

    /// Resume timing. Re-opens the interval even if it is already open.
    pub fn start_timing(&mut self) {
        self.timing.start_timing();
    }

    /// Pause timing. Idempotent.
    pub fn stop_timing(&mut self) {
        self.timing.stop_timing();
    }

    /// Zero the accumulated time and start timing.
    pub fn restart_timing(&mut self) {
        self.timing.restart_timing();
    }

    /// Report total bytes processed across all iterations of this trial.
    pub fn set_bytes_processed(&mut self, n: i64) {
        self.counters.set_bytes_processed(n);
    }

    /// Report total multiply-accumulates across all iterations of this trial.
    pub fn set_macc_processed(&mut self, n: i64) {
        self.counters.set_macc_processed(n);
    }

    pub fn timing(&self) -> &TimingController {
        &self.timing
    }

    pub fn counters(&self) -> &ThroughputCounters {
        &self.counters
    }

    pub(crate) fn reset_counters(&mut self) {
        self.counters.reset();
    }
}

/// The harness: registry, trial state and runner settings.
///
/// Created once by the driver. Nothing is ever removed from it.
#[derive(Debug, Default)]
pub struct Harness<'a> {
    registry: BenchmarkRegistry<'a>,
    trial: Trial,
    config: RunnerConfig,
}

impl<'a> Harness<'a> {
    /// Create a harness with default runner settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a harness with explicit runner settings.
    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the clock used for all subsequent trials.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.trial = Trial::with_clock(clock);
        self
    }

    /// Register a benchmark and return `self` for chaining.
    pub fn register(&mut self, name: &'a str, body: BenchFn<'a>) -> &mut Self {
        self.registry.register(name, body);
        self
    }

    pub fn registry(&self) -> &BenchmarkRegistry<'a> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BenchmarkRegistry<'a> {
        &mut self.registry
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every registered benchmark and print the table to stdout.
    pub fn run_all(&mut self) -> BenchResult<Vec<BenchmarkReport>> {
        self.run(MATCH_ALL)
    }

    /// Run benchmarks whose full name matches `pattern` and print the table
    /// to stdout.
    pub fn run(&mut self, pattern: &str) -> BenchResult<Vec<BenchmarkReport>> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let reports = self.run_to(pattern, &mut out)?;
        out.flush().map_err(|e| BenchError::Io {
            context: "flushing benchmark table",
            source: e,
        })?;
        Ok(reports)
    }

    /// Like [`Harness::run`], writing the table to `out`.
    pub fn run_to<W: Write>(
        &mut self,
        pattern: &str,
        out: &mut W,
    ) -> BenchResult<Vec<BenchmarkReport>> {
        Runner::new(&self.config).run(&self.registry, &mut self.trial, pattern, out)
    }
}
