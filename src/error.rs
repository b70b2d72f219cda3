//! Fatal conversion errors
//!
//! Anything in [`ConvertError`] aborts the run. Per-property mapping problems
//! are not represented here; they are [`crate::rdf::PropertyMappingError`]
//! values that the mapping engine logs and skips.

use crate::config::ConfigError;
use crate::rdf::{RdfError, SerializeError};
use thiserror::Error;

/// Errors that abort a conversion run
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A line is not valid JSON
    #[error("line {line}: invalid JSON: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record lacks a field every triple depends on
    #[error("line {line}: missing required field `{field}`")]
    MissingRequiredField { line: usize, field: &'static str },

    /// A record field is present but has the wrong JSON type
    #[error("line {line}: field `{field}` must be {expected}")]
    InvalidField {
        line: usize,
        field: &'static str,
        expected: &'static str,
    },

    /// The record `type` is neither `node` nor `relationship`
    #[error("line {line}: unknown record type `{kind}`")]
    UnknownRecordKind { line: usize, kind: String },

    /// An id or label cannot form a resource identifier
    #[error("line {line}: {source}")]
    InvalidIdentifier {
        line: usize,
        #[source]
        source: RdfError,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoder could not render or write the graph
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializeError),
}

impl ConvertError {
    /// Input line the error refers to, when it concerns a single record
    pub fn line(&self) -> Option<usize> {
        match self {
            ConvertError::Decode { line, .. }
            | ConvertError::MissingRequiredField { line, .. }
            | ConvertError::InvalidField { line, .. }
            | ConvertError::UnknownRecordKind { line, .. }
            | ConvertError::InvalidIdentifier { line, .. } => Some(*line),
            ConvertError::Config(_) | ConvertError::Io(_) | ConvertError::Serialization(_) => None,
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
