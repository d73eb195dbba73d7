// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Work-volume counters reported by a benchmark body.

/// Value of a counter the body did not set during the current trial.
pub const UNSET: i64 = -1;

/// Bytes and multiply-accumulates processed during one trial.
///
/// Both values cover every iteration of the trial, not a single call.
/// Nothing is validated; a negative value flows straight into the
/// throughput columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThroughputCounters {
    bytes_processed: i64,
    macc_processed: i64,
}

impl ThroughputCounters {
    /// Create counters holding the unset sentinel.
    pub fn new() -> Self {
        Self {
            bytes_processed: UNSET,
            macc_processed: UNSET,
        }
    }

    /// Put both counters back to [`UNSET`].
    pub fn reset(&mut self) {
        self.bytes_processed = UNSET;
        self.macc_processed = UNSET;
    }

    /// Last write wins.
    pub fn set_bytes_processed(&mut self, n: i64) {
        self.bytes_processed = n;
    }

    /// Last write wins.
    pub fn set_macc_processed(&mut self, n: i64) {
        self.macc_processed = n;
    }

    pub fn bytes_processed(&self) -> i64 {
        self.bytes_processed
    }

    pub fn macc_processed(&self) -> i64 {
        self.macc_processed
    }
}

impl Default for ThroughputCounters {
    fn default() -> Self {
        Self::new()
    }
}
