//! Input decoding errors.
//!
//! Validation findings are never errors in this sense; they are reported as
//! [`Diagnostic`](crate::diagnostic::Diagnostic)s inside a `ValidationResult`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to parse {what} JSON: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl WorkflowError {
    /// Stable code used when the error is surfaced next to diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::Parse { .. } => "PARSE_ERROR",
        }
    }
}
