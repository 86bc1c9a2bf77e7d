//! Error types for codegraph-summary
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::method_summary::domain::SourceSinkType;

/// Main error type for summary operations
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Endpoint kind has no external representation (e.g. a bare gap base object)
    #[error("Unsupported flow type for serialization: {kind}")]
    UnsupportedFlowType { kind: SourceSinkType },

    /// Endpoint violates a construction invariant
    #[error("Inconsistent flow endpoint: {reason}")]
    InconsistentEndpoint { reason: String },

    /// Flow references a gap the owning summary does not know about
    #[error("Unresolved gap reference in {method}: gap #{gap_id}")]
    UnresolvedGapReference { method: String, gap_id: u32 },

    /// Attempt to combine summaries of two different methods
    #[error("Method mismatch: expected {expected}, found {found}")]
    MethodMismatch { expected: String, found: String },

    /// Summary document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SummaryError {
    /// Create an inconsistent-endpoint error
    pub fn inconsistent(reason: impl Into<String>) -> Self {
        SummaryError::InconsistentEndpoint {
            reason: reason.into(),
        }
    }

    /// Create an unresolved-gap error
    pub fn unresolved_gap(method: impl Into<String>, gap_id: u32) -> Self {
        SummaryError::UnresolvedGapReference {
            method: method.into(),
            gap_id,
        }
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        SummaryError::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        SummaryError::Serialization(format!("JSON error: {}", err))
    }
}

/// Result type alias for summary operations
pub type SummaryResult<T> = std::result::Result<T, SummaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SummaryError::UnsupportedFlowType {
            kind: SourceSinkType::GapBaseObject,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported flow type for serialization: GapBaseObject"
        );

        let err = SummaryError::unresolved_gap("<Foo: void bar()>", 3);
        assert!(err.to_string().contains("gap #3"));
        assert!(err.to_string().contains("<Foo: void bar()>"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json")
            .err()
            .unwrap();
        let err: SummaryError = json_err.into();
        assert!(matches!(err, SummaryError::Serialization(_)));
    }
}
