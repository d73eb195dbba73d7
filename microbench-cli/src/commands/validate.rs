// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mbench validate` command - Validate configuration file.

use microbench_core::{ConfigLoader, NamePattern};

pub fn execute(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file, "Validating configuration");

    let result = ConfigLoader::load_file(file)
        .and_then(|config| NamePattern::new(&config.filter).map(|_| config));

    match result {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Runner Settings:");
            println!("  Min Iterations:     {}", config.runner.min_iterations);
            println!("  Max Iterations:     {}", config.runner.max_iterations);
            println!(
                "  Min Time:           {}ms",
                config.runner.min_time.as_millis()
            );
            println!("  Overshoot:          {}x", config.runner.overshoot);
            println!();
            println!("Default Filter:       {}", config.filter);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
