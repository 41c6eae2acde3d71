use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide error type.
///
/// Only a small set of conditions are fatal to a refresh; everything that can
/// be recovered per-document is reported as a
/// [`BuildDiagnostic`](crate::codec::BuildDiagnostic) instead of an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum NotegraphError {
    /// The corpus provider could not enumerate documents. Fatal for the
    /// current refresh; the previously published snapshot is left untouched.
    #[error("Corpus provider failure: {0}")]
    Provider(String),
    #[error("File system error: {0}")]
    Io(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Graph build software error: {0}")]
    Internal(String),
}

impl From<io::Error> for NotegraphError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => NotegraphError::NotFound(format!("{x}")),
            _ => NotegraphError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<serde_json::Error> for NotegraphError {
    fn from(src: serde_json::Error) -> Self {
        NotegraphError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<regex::Error> for NotegraphError {
    fn from(src: regex::Error) -> Self {
        NotegraphError::Internal(format!("Regex parse failed: {src}"))
    }
}
