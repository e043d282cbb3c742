//! Runtime configuration, read from the environment.

use std::{env, path::PathBuf};

/// Data file used when `ROLLCALL_DATA_FILE` is not set.
pub const DEFAULT_DATA_FILE: &str = "events.ron";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the event collection is loaded from and saved to.
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key/value source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = lookup("ROLLCALL_DATA_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self { data_file }
    }
}
