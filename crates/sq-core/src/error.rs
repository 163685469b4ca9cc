//! Core error types for Structured Query RS
//!
//! Construction errors are raised synchronously to the caller. Malformed input
//! that is not covered here is normalized rather than rejected.

use thiserror::Error;

use crate::config::ConfigError;

/// Core error type for all query construction operations
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid rangeConstraint query operator: {operator}")]
    InvalidOperator { operator: String },

    #[error("Unknown datatype: {datatype}")]
    UnknownDatatype { datatype: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl QueryError {
    pub fn invalid_operator(operator: impl Into<String>) -> Self {
        Self::InvalidOperator {
            operator: operator.into(),
        }
    }

    pub fn unknown_datatype(datatype: impl Into<String>) -> Self {
        Self::UnknownDatatype {
            datatype: datatype.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidOperator { .. } => "invalid_operator",
            QueryError::UnknownDatatype { .. } => "unknown_datatype",
            QueryError::Serialization(_) => "serialization_error",
            QueryError::Config(_) => "configuration_error",
        }
    }
}
