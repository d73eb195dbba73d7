// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Microbench CLI
//!
//! Command-line driver: registers the benchmark suites, then runs, lists or
//! validates.

use clap::{Parser, Subcommand};

mod commands;
mod suites;

/// mbench - Micro-benchmark runner with adaptive iteration search
#[derive(Parser)]
#[command(name = "mbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Runner configuration file path [default: microbench.yaml if present]
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run benchmarks and print the comparison table
    Run {
        /// Regex matched against full benchmark names ("all" selects everything)
        filter: Option<String>,
    },

    /// List registered benchmarks without running them
    List {
        /// Regex matched against full benchmark names ("all" selects everything)
        filter: Option<String>,
    },

    /// Validate a runner configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the table.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Run { filter } => {
            commands::run::execute(cli.config.as_deref(), filter.as_deref())
        }
        Commands::List { filter } => {
            commands::list::execute(cli.config.as_deref(), filter.as_deref())
        }
        Commands::Validate { file } => commands::validate::execute(&file),
    }
}
