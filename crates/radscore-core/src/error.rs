use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Why an input map was rejected before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationKind {
    /// A required field was not supplied.
    MissingInput,
    /// A value could not be parsed as its declared type.
    InvalidFormat,
    /// A parseable number outside the bound the rubric requires.
    OutOfRange,
}

/// A single blocking message shown to the user. Evaluation never proceeds
/// once one of these is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub fields: Vec<String>,
    pub message: String,
}

impl ValidationError {
    pub fn missing(fields: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::MissingInput,
            fields,
            message: message.into(),
        }
    }

    pub fn invalid_format(field: &str, message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::InvalidFormat,
            fields: vec![field.to_string()],
            message: message.into(),
        }
    }

    pub fn out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::OutOfRange,
            fields: vec![field.to_string()],
            message: message.into(),
        }
    }

    /// Replace the user-facing message, keeping kind and fields.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}
