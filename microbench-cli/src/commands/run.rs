// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mbench run` command - Run benchmarks and print the table.

use microbench_core::Harness;

use crate::suites;

pub fn execute(
    config_path: Option<&str>,
    filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let pattern = filter.map(str::to_string).unwrap_or(config.filter);

    let mut harness = Harness::with_config(config.runner);
    suites::register_all(harness.registry_mut());

    tracing::info!(
        pattern = %pattern,
        registered = harness.registry().len(),
        "Running benchmarks"
    );

    let reports = harness.run(&pattern)?;
    tracing::info!(completed = reports.len(), "Benchmark run finished");

    Ok(())
}
