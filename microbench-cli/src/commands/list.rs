// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mbench list` command - List registered benchmarks.
//!
//! Applies the same full-name filter as `run` but executes nothing.

use microbench_core::{BenchmarkRegistry, NamePattern};

use crate::suites;

pub fn execute(
    config_path: Option<&str>,
    filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let pattern = NamePattern::new(filter.unwrap_or(&config.filter))?;

    let mut registry = BenchmarkRegistry::new();
    suites::register_all(&mut registry);

    let matched: Vec<_> = registry.matching(&pattern).map(|b| b.name()).collect();

    if matched.is_empty() {
        println!("No benchmarks match '{}'.", pattern.as_str());
        return Ok(());
    }

    println!("Benchmarks matching '{}':", pattern.as_str());
    for name in &matched {
        println!("  - {}", name);
    }
    println!();
    println!("Total: {} of {} benchmark(s)", matched.len(), registry.len());

    Ok(())
}
