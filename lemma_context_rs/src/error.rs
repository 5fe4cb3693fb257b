use std::io;

use thiserror::Error;

/// Errors raised while reading corpora, transforming them or scoring predictions.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A data row has fewer columns than the column layout requires.
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("reading CoNLL-X input failed: {0}")]
    Conllx(String),

    #[error("parsing the config failed: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid value '{value}' for {option}")]
    InvalidOption { option: String, value: String },

    /// No output path was given and none can be derived from the input.
    #[error("can't decide how to name the transformation: {0}")]
    AmbiguousOutput(String),

    /// Predictions and ground truth cannot be aligned row by row.
    #[error("prediction has {prediction} rows, ground truth has {ground}")]
    RowCountMismatch { prediction: usize, ground: usize },

    #[error("invalid subword separator pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("exporting the score report failed: {0}")]
    Export(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_option(option: &str, value: impl ToString) -> Self {
        Error::InvalidOption {
            option: option.to_owned(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
