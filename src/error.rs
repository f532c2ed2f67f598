//! Error types for loading data and reading configuration.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a [`Dataset`](crate::types::Dataset). Always fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch dataset from {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no `{0}` column")]
    MissingDateColumn(&'static str),

    #[error("line {line}: cannot parse date {value:?}")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: column `{column}` must be 0 or 1, got {value}")]
    InvalidFlag {
        line: usize,
        column: &'static str,
        value: u8,
    },

    #[error(
        "line {line} ({date}): casual ({casual}) + registered ({registered}) != total ({total})"
    )]
    InconsistentTotal {
        line: usize,
        date: NaiveDate,
        casual: u32,
        registered: u32,
        total: u32,
    },

    #[error("dataset contains no records")]
    Empty,
}

/// Failure to read the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
