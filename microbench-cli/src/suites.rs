// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark suites compiled into `mbench`.
//!
//! Registration order here is display order.

use microbench_core::BenchmarkRegistry;
use tracing::debug;

type RegisterFn = fn(&mut BenchmarkRegistry<'static>);

const SUITES: &[(&str, RegisterFn)] = &[("concat", microbench_ops::register)];

/// Run every suite's registration in order.
pub fn register_all(registry: &mut BenchmarkRegistry<'static>) {
    for (suite, register) in SUITES {
        let before = registry.len();
        register(&mut *registry);
        debug!(suite = *suite, added = registry.len() - before, "Registered suite");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all() {
        let mut registry = BenchmarkRegistry::new();
        register_all(&mut registry);

        assert_eq!(registry.len(), 8);
        assert!(registry
            .names()
            .iter()
            .all(|name| name.starts_with("BM_CONCAT_")));
    }
}
