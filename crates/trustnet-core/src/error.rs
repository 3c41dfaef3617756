// crates/trustnet-core/src/error.rs

use thiserror::Error;

/// Error taxonomy for TrustNet scoring.
///
/// `Validation`, `Authentication`, and `UnsupportedFormat` abort a request and
/// are surfaced to the caller. `Computation` and `Collaborator` are caught by
/// the narrowest scoring unit and replaced with a neutral fallback score.
#[derive(Debug, Error)]
pub enum TrustError {
    /// Required evidence is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Signature did not recover to the claimed address.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Document extension outside {pdf, docx, txt}.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A scoring stage produced an unusable value.
    #[error("Computation error: {0}")]
    Computation(String),

    /// An external collaborator (classifier, model, fetcher, ledger) failed or timed out.
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl TrustError {
    /// HTTP-equivalent status code for this error at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            TrustError::Validation(_) => 400,
            TrustError::Authentication(_) => 401,
            TrustError::UnsupportedFormat(_) => 400,
            TrustError::Serialization(_) => 400,
            TrustError::Computation(_) | TrustError::Collaborator(_) | TrustError::Io(_) => 500,
        }
    }

    /// Whether this error must abort the request rather than degrade to a fallback.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TrustError::Validation(_)
                | TrustError::Authentication(_)
                | TrustError::UnsupportedFormat(_)
        )
    }
}

impl From<serde_json::Error> for TrustError {
    fn from(e: serde_json::Error) -> Self {
        TrustError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for TrustError {
    fn from(e: std::io::Error) -> Self {
        TrustError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_api_contract() {
        assert_eq!(TrustError::Validation("x".into()).status_code(), 400);
        assert_eq!(TrustError::Authentication("x".into()).status_code(), 401);
        assert_eq!(TrustError::UnsupportedFormat("x".into()).status_code(), 400);
        assert_eq!(TrustError::Computation("x".into()).status_code(), 500);
    }

    #[test]
    fn only_boundary_errors_are_fatal() {
        assert!(TrustError::Validation("x".into()).is_fatal());
        assert!(TrustError::Authentication("x".into()).is_fatal());
        assert!(!TrustError::Computation("x".into()).is_fatal());
        assert!(!TrustError::Collaborator("timeout".into()).is_fatal());
    }
}
