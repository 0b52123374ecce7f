// src/error.rs

use thiserror::Error;

/// Errors raised while configuring or loading a simulation.
///
/// All of these are fatal at startup. Saving reports failures through the
/// log instead of this type.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: need at least 5 fields to create a body, found {found}")]
    TooFewFields { line: u64, found: usize },

    #[error("line {line}: cannot convert {value:?} to a number")]
    InvalidField { line: u64, value: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
