//! Errors raised while loading price partitions.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use std::path::PathBuf;

pub type IngestResult<T> = Result<T, IngestError>;

#[derive(Debug)]
pub enum IngestError {
    /// The file could not be opened or read.
    Io { path: PathBuf, source: std::io::Error },

    /// Malformed delimited data.
    Csv(csv::Error),

    /// A required column is absent from the header.
    MissingColumn { path: PathBuf, column: String },

    /// A timestamp or value field did not parse, or parsed to a non-finite
    /// number. `line` is 1-based and counts the header.
    InvalidValue { path: PathBuf, line: usize, column: String, value: String },

    /// Timestamps within a partition did not strictly increase.
    NonMonotonicTimestamp { path: PathBuf, line: usize, previous: i64, current: i64 },

    /// No row matched the selector across all partitions.
    EmptySelection { product: Option<String> },

    NoPartitions,
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Io { source, .. } => Some(source),
            IngestError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Io { path, source } => {
                write!(f, "Failed to read '{}': {source}", path.display())
            }
            IngestError::Csv(err) => write!(f, "Malformed delimited data: {err}"),
            IngestError::MissingColumn { path, column } => {
                write!(f, "Column '{column}' not found in '{}'.", path.display())
            }
            IngestError::InvalidValue { path, line, column, value } => write!(
                f,
                "Invalid value '{value}' in column '{column}' at {}:{line}.",
                path.display()
            ),
            IngestError::NonMonotonicTimestamp { path, line, previous, current } => write!(
                f,
                "Timestamp {current} at {}:{line} does not exceed the previous \
                 timestamp {previous}.",
                path.display()
            ),
            IngestError::EmptySelection { product: Some(product) } => {
                write!(f, "No rows found for product '{product}'.")
            }
            IngestError::EmptySelection { product: None } => write!(f, "No rows found."),
            IngestError::NoPartitions => write!(f, "No input partitions were given."),
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Csv(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<IngestError> for PyErr {
    fn from(err: IngestError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
