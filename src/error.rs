//! Error types for knowledge-base loading and engine configuration
//!
//! Matching itself has no error path: "no match" and "unknown keyword" are
//! ordinary `None` outcomes. Only the out-of-band paths that touch the
//! outside world (fetching a reload batch, reading configuration) can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching or iterating an external knowledge batch.
///
/// A reload that returns one of these has left the published knowledge base
/// untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Knowledge fetch failed: {0}")]
    Fetch(String),

    #[error("Failed to read knowledge file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse knowledge file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported knowledge file format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Errors raised while loading or validating [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
