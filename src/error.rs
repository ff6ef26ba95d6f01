//! Error types for aggregate-prefixes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Invalid prefix '{token}': {reason}")]
    MalformedPrefix { token: String, reason: String },

    #[error("Invalid max length {max_length}: must be between 0 and 128")]
    InvalidMaxLength { max_length: i64 },
}

impl AggregateError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedPrefix {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
