// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark runner.
//!
//! Selects benchmarks by name, finds an iteration count long enough to
//! clear the time floor, and prints one table row per benchmark.
//!
//! # Iteration search
//!
//! Starting at `min_iterations`, each trial resets the counters, restarts
//! timing, runs the body, and stops timing. A trial that measures at least
//! `min_time` (or has reached `max_iterations`) is final. Otherwise the next
//! count is scaled to aim `overshoot` times past the floor, so a body with
//! constant per-call cost usually finishes on the second trial.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::context::Trial;
use crate::error::{BenchError, BenchResult};
use crate::registry::{Benchmark, BenchmarkRegistry, NamePattern};

/// Minimum width of the name column.
const MIN_NAME_WIDTH: usize = 10;
/// Width of the four numeric columns plus their separators.
const NUMERIC_COLUMNS_WIDTH: usize = 44;
/// Lower bound on the measured time when scaling the next count.
const MIN_SCALING_SECONDS: f64 = 1e-9;

/// One trial of the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRecord {
    pub iterations: u64,
    pub seconds: f64,
}

/// Outcome of the search for one benchmark: the final trial plus the
/// history that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub iterations: u64,
    pub seconds: f64,
    pub bytes_processed: i64,
    pub macc_processed: i64,
    pub trials: Vec<TrialRecord>,
}

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub name: String,
    pub measurement: Measurement,
}

impl BenchmarkReport {
    pub fn iterations(&self) -> u64 {
        self.measurement.iterations
    }

    pub fn seconds(&self) -> f64 {
        self.measurement.seconds
    }

    pub fn ns_per_iter(&self) -> f64 {
        self.measurement.seconds * 1e9 / self.measurement.iterations as f64
    }

    /// Not guarded against unset counters or a zero duration.
    pub fn mb_per_sec(&self) -> f64 {
        (self.measurement.bytes_processed as f64 * 1e-6) / self.measurement.seconds
    }

    /// Not guarded against unset counters or a zero duration.
    pub fn gmacc_per_sec(&self) -> f64 {
        (self.measurement.macc_processed as f64 * 1e-9) / self.measurement.seconds
    }
}

/// Drives selection, measurement and reporting.
#[derive(Debug, Clone, Copy)]
pub struct Runner<'c> {
    config: &'c RunnerConfig,
}

impl<'c> Runner<'c> {
    pub fn new(config: &'c RunnerConfig) -> Self {
        Self { config }
    }

    /// Run every benchmark matching `pattern` and write the table to `out`.
    ///
    /// Fails before writing anything if `pattern` does not compile. Writes
    /// nothing at all if no benchmark was ever registered.
    pub fn run<W: Write>(
        &self,
        registry: &BenchmarkRegistry<'_>,
        trial: &mut Trial,
        pattern: &str,
        out: &mut W,
    ) -> BenchResult<Vec<BenchmarkReport>> {
        let pattern = NamePattern::new(pattern)?;

        if registry.is_empty() {
            debug!("No benchmarks registered");
            return Ok(Vec::new());
        }

        let width = registry
            .matching(&pattern)
            .map(|b| b.name().chars().count())
            .fold(MIN_NAME_WIDTH, usize::max);

        write_header(out, width)?;

        let mut reports = Vec::new();
        for benchmark in registry.matching(&pattern) {
            let measurement = self.measure(benchmark, trial);
            let report = BenchmarkReport {
                name: benchmark.name().to_string(),
                measurement,
            };

            info!(
                name = %report.name,
                iterations = report.iterations(),
                seconds = report.seconds(),
                ns_per_iter = report.ns_per_iter(),
                "Benchmark finished"
            );

            write_row(out, width, &report)?;
            reports.push(report);
        }

        Ok(reports)
    }

    /// Search for an iteration count whose trial clears the time floor.
    pub fn measure(&self, benchmark: &Benchmark<'_>, trial: &mut Trial) -> Measurement {
        let min_time = self.config.min_time_secs();
        let max_iterations = self.config.max_iterations;

        let mut iterations = self.config.min_iterations.min(max_iterations);
        let mut trials = Vec::new();

        loop {
            trial.reset_counters();
            trial.restart_timing();
            benchmark.run(trial, iterations);
            trial.stop_timing();

            let seconds = trial.timing().elapsed_seconds();
            trials.push(TrialRecord {
                iterations,
                seconds,
            });
            debug!(name = benchmark.name(), iterations, seconds, "Trial complete");

            if seconds >= min_time || iterations >= max_iterations {
                if seconds < min_time {
                    warn!(
                        name = benchmark.name(),
                        iterations,
                        seconds,
                        "Iteration cap reached before the time floor"
                    );
                }

                let counters = trial.counters();
                return Measurement {
                    iterations,
                    seconds,
                    bytes_processed: counters.bytes_processed(),
                    macc_processed: counters.macc_processed(),
                    trials,
                };
            }

            let multiplier = self.config.overshoot * min_time / seconds.max(MIN_SCALING_SECONDS);
            let next = (multiplier * iterations as f64) as u64;
            // Only reachable with an overshoot close to 1.0.
            let next = next.max(iterations + 1);
            iterations = next.min(max_iterations);
        }
    }
}

fn io_error(context: &'static str) -> impl FnOnce(std::io::Error) -> BenchError {
    move |source| BenchError::Io { context, source }
}

fn write_header<W: Write>(out: &mut W, width: usize) -> BenchResult<()> {
    writeln!(
        out,
        "{:<width$} {:>10} {:>10} {:>10} {:>10}",
        "Benchmark",
        "Time(ns)",
        "Iterations",
        "Input(MB/s)",
        "MACC(G/s)",
        width = width
    )
    .map_err(io_error("writing table header"))?;
    writeln!(out, "{}", "-".repeat(width + NUMERIC_COLUMNS_WIDTH))
        .map_err(io_error("writing table separator"))
}

fn write_row<W: Write>(out: &mut W, width: usize, report: &BenchmarkReport) -> BenchResult<()> {
    writeln!(
        out,
        "{:<width$} {:>10.0} {:>10} {:>10.2} {:>10.2}",
        report.name,
        report.ns_per_iter(),
        report.iterations(),
        report.mb_per_sec(),
        report.gmacc_per_sec(),
        width = width
    )
    .map_err(io_error("writing table row"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::counters::UNSET;
    use crate::timing::ManualClock;

    fn manual_trial() -> (ManualClock, Trial) {
        let clock = ManualClock::new();
        let trial = Trial::with_clock(Box::new(clock.clone()));
        (clock, trial)
    }

    fn report(iterations: u64, seconds: f64, bytes: i64, macc: i64) -> BenchmarkReport {
        BenchmarkReport {
            name: "BM_Report".to_string(),
            measurement: Measurement {
                iterations,
                seconds,
                bytes_processed: bytes,
                macc_processed: macc,
                trials: vec![TrialRecord {
                    iterations,
                    seconds,
                }],
            },
        }
    }

    #[test]
    fn test_slow_body_finishes_on_first_trial() {
        let (clock, mut trial) = manual_trial();
        let body = move |_: &mut Trial, _: u64| clock.advance(600_000);
        let benchmark = Benchmark::new("BM_Slow", &body);

        let config = RunnerConfig::default();
        let measurement = Runner::new(&config).measure(&benchmark, &mut trial);

        assert_eq!(measurement.iterations, 10);
        assert_eq!(measurement.trials.len(), 1);
        assert!((measurement.seconds - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_cost_converges_with_overshoot() {
        let (clock, mut trial) = manual_trial();
        let body = move |_: &mut Trial, iters: u64| clock.advance(iters as i64 * 50);
        let benchmark = Benchmark::new("BM_Fast", &body);

        let config = RunnerConfig::default();
        let measurement = Runner::new(&config).measure(&benchmark, &mut trial);

        // 10 x 50us = 0.5ms, then scaled 2000x to ~20000 iterations (~1s).
        assert_eq!(measurement.trials.len(), 2);
        assert!(measurement.iterations >= 10_000);
        assert!(measurement.seconds >= 0.5 && measurement.seconds <= 1.0 + 1e-9);
    }

    #[test]
    fn test_zero_duration_body_jumps_to_cap() {
        let (_clock, mut trial) = manual_trial();
        let body = |_: &mut Trial, _: u64| {};
        let benchmark = Benchmark::new("BM_Empty", &body);

        let config = RunnerConfig::default();
        let measurement = Runner::new(&config).measure(&benchmark, &mut trial);

        assert_eq!(measurement.iterations, 1_000_000_000);
        assert_eq!(measurement.seconds, 0.0);
        assert_eq!(measurement.trials.len(), 2);
    }

    #[test]
    fn test_iteration_cap_terminates_search() {
        let (clock, mut trial) = manual_trial();
        // One microsecond per 1000 iterations never reaches the floor under
        // a small cap.
        let body = move |_: &mut Trial, iters: u64| clock.advance(iters as i64 / 1000);
        let benchmark = Benchmark::new("BM_Capped", &body);

        let config = RunnerConfig {
            max_iterations: 50_000,
            ..RunnerConfig::default()
        };
        let measurement = Runner::new(&config).measure(&benchmark, &mut trial);

        assert_eq!(measurement.iterations, 50_000);
        assert!(measurement.seconds < 0.5);
        assert!(measurement.trials.iter().all(|t| t.iterations <= 50_000));
    }

    #[test]
    fn test_counters_reset_between_trials() {
        let (clock, mut trial) = manual_trial();
        // Sets the counter only on the first (short) trial.
        let body = move |trial: &mut Trial, iters: u64| {
            if iters == 10 {
                trial.set_bytes_processed(999);
            }
            clock.advance(iters as i64 * 100);
        };
        let benchmark = Benchmark::new("BM_Once", &body);

        let config = RunnerConfig::default();
        let measurement = Runner::new(&config).measure(&benchmark, &mut trial);

        assert!(measurement.trials.len() > 1);
        assert_eq!(measurement.bytes_processed, UNSET);
        assert_eq!(measurement.macc_processed, UNSET);
    }

    #[test]
    fn test_body_can_exclude_setup() {
        let (clock, mut trial) = manual_trial();
        let body = move |trial: &mut Trial, iters: u64| {
            trial.stop_timing();
            clock.advance(1_000_000); // setup, untimed
            trial.start_timing();
            clock.advance(iters as i64 * 100);
        };
        let benchmark = Benchmark::new("BM_Setup", &body);

        let config = RunnerConfig::default();
        let measurement = Runner::new(&config).measure(&benchmark, &mut trial);

        let first = measurement.trials[0];
        assert_eq!(first.iterations, 10);
        assert!((first.seconds - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_custom_floor() {
        let (clock, mut trial) = manual_trial();
        let body = move |_: &mut Trial, iters: u64| clock.advance(iters as i64 * 10);
        let benchmark = Benchmark::new("BM_Floor", &body);

        let config = RunnerConfig {
            min_time: Duration::from_millis(10),
            ..RunnerConfig::default()
        };
        let measurement = Runner::new(&config).measure(&benchmark, &mut trial);
        assert!(measurement.seconds >= 0.01);
        assert!(measurement.seconds < 0.5);
    }

    #[test]
    fn test_report_throughput() {
        let r = report(1000, 0.5, 2_000_000, 4_000_000_000);
        assert!((r.ns_per_iter() - 500_000.0).abs() < 1e-6);
        assert!((r.mb_per_sec() - 4.0).abs() < 1e-9);
        assert!((r.gmacc_per_sec() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_unset_counters_propagate() {
        let r = report(10, 0.5, UNSET, UNSET);
        assert!(r.mb_per_sec() < 0.0);
        assert!(r.gmacc_per_sec() < 0.0);
    }

    #[test]
    fn test_row_layout() {
        let mut out = Vec::new();
        write_header(&mut out, 12).unwrap();
        write_row(&mut out, 12, &report(20_000, 1.0, 20_000_000, 0)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Benchmark      Time(ns) Iterations Input(MB/s)  MACC(G/s)"
        );
        assert_eq!(lines[1], "-".repeat(56));
        assert_eq!(
            lines[2],
            "BM_Report         50000      20000      20.00       0.00"
        );
    }
}
