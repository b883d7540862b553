//! # Error Types
//!
//! Structured error types for tutor_core. Evaluation failures are surfaced
//! as typed errors rather than coerced into `inf`/`NaN`, so the UI layer can
//! decide how to present them to the student.
//!
//! ## Example
//!
//! ```rust
//! use tutor_core::errors::{TutorError, TutorResult};
//!
//! fn validate_area(area_mm2: f64) -> TutorResult<f64> {
//!     if area_mm2 <= 0.0 {
//!         return Err(TutorError::domain("area_mm2", area_mm2, "non-positive area"));
//!     }
//!     Ok(area_mm2)
//! }
//!
//! assert!(validate_area(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for tutor_core operations
pub type TutorResult<T> = Result<T, TutorError>;

/// Structured error type for evaluation, rendering and configuration.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TutorError {
    /// A physical formula received a divisor it cannot accept (zero or negative
    /// area, section modulus, ...)
    #[error("Domain error for '{quantity}' = {value}: {reason}")]
    Domain {
        quantity: String,
        value: f64,
        reason: String,
    },

    /// The lab/topic identifier is not part of the catalogue
    #[error("Unknown lab topic: {topic}")]
    UnknownTopic { topic: String },

    /// Slider inputs were built for a different topic than the one requested
    #[error("Inputs do not match topic {topic}: expected {expected} inputs")]
    InputMismatch { topic: String, expected: String },

    /// An input value is invalid (unknown slider key, bad setting, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Diagram compilation or rasterization failed
    #[error("Render failed during {stage}: {reason}")]
    RenderFailed { stage: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TutorError {
    /// Create a Domain error
    pub fn domain(quantity: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        TutorError::Domain {
            quantity: quantity.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create an UnknownTopic error
    pub fn unknown_topic(topic: impl Into<String>) -> Self {
        TutorError::UnknownTopic {
            topic: topic.into(),
        }
    }

    /// Create an InputMismatch error
    pub fn input_mismatch(topic: impl Into<String>, expected: impl Into<String>) -> Self {
        TutorError::InputMismatch {
            topic: topic.into(),
            expected: expected.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TutorError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        TutorError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        TutorError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from the physics rather than from the caller
    pub fn is_domain(&self) -> bool {
        matches!(self, TutorError::Domain { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TutorError::Domain { .. } => "DOMAIN_ERROR",
            TutorError::UnknownTopic { .. } => "UNKNOWN_TOPIC",
            TutorError::InputMismatch { .. } => "INPUT_MISMATCH",
            TutorError::InvalidInput { .. } => "INVALID_INPUT",
            TutorError::RenderFailed { .. } => "RENDER_FAILED",
            TutorError::FileError { .. } => "FILE_ERROR",
            TutorError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        TutorError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = TutorError::domain("area_mm2", -5.0, "non-positive area");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Domain\""));
        let roundtrip: TutorError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TutorError::unknown_topic("SM_99").error_code(), "UNKNOWN_TOPIC");
        assert_eq!(TutorError::domain("S", 0.0, "zero").error_code(), "DOMAIN_ERROR");
        assert!(TutorError::domain("S", 0.0, "zero").is_domain());
        assert!(!TutorError::unknown_topic("x").is_domain());
    }

    #[test]
    fn test_display_mentions_field() {
        let error = TutorError::invalid_input("tau", "abc", "not a slider of SM_1");
        assert!(error.to_string().contains("'tau'"));
    }
}
