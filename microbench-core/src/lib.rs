//! Microbench Core Library
//!
//! A micro-benchmark harness. Benchmarks register under a name, the runner
//! searches for an iteration count whose trial clears a minimum measurement
//! window, and a comparison table of per-call latency and reported
//! throughput is printed.
//!
//! ```no_run
//! use microbench_core::{Harness, Trial};
//!
//! fn sum_bytes(trial: &mut Trial, iters: u64) {
//!     trial.stop_timing();
//!     let data = vec![1u8; 4096];
//!     trial.set_bytes_processed(iters as i64 * data.len() as i64);
//!     trial.start_timing();
//!     for _ in 0..iters {
//!         std::hint::black_box(data.iter().map(|&b| b as u64).sum::<u64>());
//!     }
//! }
//!
//! let mut harness = Harness::new();
//! harness.register("BM_SumBytes", &sum_bytes);
//! harness.run_all().unwrap();
//! ```

pub mod config;
pub mod context;
pub mod counters;
pub mod error;
pub mod registry;
pub mod runner;
pub mod timing;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, RunnerConfig};
pub use context::{Harness, Trial};
pub use counters::ThroughputCounters;
pub use error::{BenchError, BenchResult, ConfigValidationError};
pub use registry::{BenchFn, Benchmark, BenchmarkRegistry, NamePattern, MATCH_ALL};
pub use runner::{BenchmarkReport, Measurement, Runner, TrialRecord};
pub use timing::{Clock, ManualClock, MonotonicClock, TimingController};
