use thiserror::Error;

/// Message shown when the service rejects a request without saying why.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unexpected error";

/// Errors surfaced by a prediction round-trip.
///
/// Every variant renders the same way in the error view, through `Display`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Non-success status. The message is the service's `error` field, verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Prediction service unreachable: {reason}")]
    Transport { reason: String },

    #[error("Invalid response from prediction service: {reason}")]
    InvalidBody { reason: String },
}

impl PredictionError {
    /// Builds a rejection from the body's `error` field, falling back to
    /// [`FALLBACK_ERROR_MESSAGE`] when it is missing or empty.
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        Self::Rejected { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
