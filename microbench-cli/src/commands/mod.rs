// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

pub mod list;
pub mod run;
pub mod validate;

use std::path::Path;

use microbench_core::{BenchResult, Config, ConfigLoader};

/// Config file picked up from the working directory when `-c` is not given.
pub const DEFAULT_CONFIG: &str = "microbench.yaml";

/// Load an explicit config file, else the default one if it exists, else
/// built-in defaults.
pub fn load_config(path: Option<&str>) -> BenchResult<Config> {
    match path {
        Some(path) => ConfigLoader::load_file(path),
        None if Path::new(DEFAULT_CONFIG).exists() => ConfigLoader::load_file(DEFAULT_CONFIG),
        None => {
            tracing::debug!("No configuration file, using defaults");
            Ok(Config::default())
        }
    }
}
