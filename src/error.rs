// src/error.rs

use thiserror::Error;

/// Errors raised while reading inputs, writing reports, or loading configuration.
///
/// The planning engine itself never fails; everything here comes from the
/// layer that prepares its input or consumes its output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required columns absent from a CSV header (sorted).
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("line {line}: cannot parse date '{value}'")]
    InvalidDate { line: usize, value: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
