//! Pipeline-level error taxonomy
//!
//! Component-local failures (model errors, parse errors, render errors) are
//! recovered where they occur and never reach this type. What remains is the
//! small set of failures a clone request can actually surface to a caller.

use crate::domain::pipeline::StageTransitionError;

/// Error surfaced by the clone pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    /// Navigation or screenshot capture failed. Fatal to the request.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// The generated project failed completeness checks. Reported as a
    /// client-facing failure, never retried.
    #[error("Generated code validation failed: {0}")]
    Validation(String),

    /// Internal stage-machine violation.
    #[error(transparent)]
    Stage(#[from] StageTransitionError),

    /// Filesystem failure while persisting the generated project.
    #[error("Persistence failed: {0}")]
    Io(#[from] std::io::Error),

    /// Anything unclassified, carrying the original message.
    #[error("{0}")]
    Internal(String),
}

impl CloneError {
    /// Whether the failure is the caller's problem (HTTP 400 class) rather
    /// than the service's (HTTP 500 class).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(CloneError::Validation("missing package.json".into()).is_client_error());
        assert!(!CloneError::Capture("timeout".into()).is_client_error());
        assert!(!CloneError::Internal("boom".into()).is_client_error());
    }

    #[test]
    fn test_error_messages_carry_original_text() {
        let err = CloneError::Capture("navigation failed for https://x: timeout".into());
        assert!(err.to_string().contains("navigation failed"));
    }
}
