//! Error types for the choreography engine.
//!
//! The engine itself has no fallible I/O: duplicate deaths, stale cleanups
//! and log resets are routine and never surface as errors. What can fail is
//! building a session from a bad configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChoreoError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChoreoError>;
