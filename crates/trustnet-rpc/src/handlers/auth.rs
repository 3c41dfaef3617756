// crates/trustnet-rpc/src/handlers/auth.rs
//
// Signature gating for the signed methods.

use serde::{Deserialize, Serialize};

use trustnet_core::crypto;
use trustnet_core::TrustError;

/// Personal-message signature attached to a signed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedRequest {
    /// Claimed signer, `0x`-prefixed.
    pub address: String,
    /// 65-byte `r||s||v` signature, hex.
    pub signature: String,
    /// Client-chosen timestamp, echoed verbatim into the signed message.
    pub timestamp: String,
}

pub fn document_message(timestamp: &str, file_name: &str) -> String {
    format!("Document Verification Request\nTimestamp: {}\nFile: {}", timestamp, file_name)
}

pub fn financial_message(timestamp: &str, address: &str) -> String {
    format!("Financial Verification Request\nTimestamp: {}\nAddress: {}", timestamp, address)
}

pub fn trust_score_message(timestamp: &str, address: &str) -> String {
    format!("Trust Score Request\nTimestamp: {}\nAddress: {}", timestamp, address)
}

/// Check `auth` against the message built by `message`.
///
/// A missing signature and a signature that does not recover to the claimed
/// address both fail with `Authentication`.
pub fn require<F>(auth: Option<&SignedRequest>, message: F) -> Result<&SignedRequest, TrustError>
where
    F: FnOnce(&SignedRequest) -> String,
{
    let auth = auth.ok_or_else(|| TrustError::Authentication("Signature required".to_string()))?;
    crypto::require_signature(&message(auth), &auth.signature, &auth.address)?;
    tracing::debug!(address = %auth.address, "Request signature verified");
    Ok(auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_core::crypto::Keypair;

    fn signed(keypair: &Keypair, message: &str, timestamp: &str) -> SignedRequest {
        SignedRequest {
            address: keypair.address(),
            signature: keypair.sign(message).unwrap(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn message_formats() {
        assert_eq!(
            document_message("1700000000", "cv.pdf"),
            "Document Verification Request\nTimestamp: 1700000000\nFile: cv.pdf"
        );
        assert_eq!(
            trust_score_message("1", "0xabc"),
            "Trust Score Request\nTimestamp: 1\nAddress: 0xabc"
        );
    }

    #[test]
    fn valid_signature_passes() {
        let keypair = Keypair::generate();
        let message = financial_message("42", &keypair.address());
        let auth = signed(&keypair, &message, "42");
        assert!(require(Some(&auth), |a| financial_message(&a.timestamp, &a.address)).is_ok());
    }

    #[test]
    fn missing_signature_is_unauthorized() {
        let err = require(None, |a| financial_message(&a.timestamp, &a.address)).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn tampered_timestamp_is_unauthorized() {
        let keypair = Keypair::generate();
        let message = financial_message("42", &keypair.address());
        let mut auth = signed(&keypair, &message, "42");
        auth.timestamp = "43".to_string();
        let err =
            require(Some(&auth), |a| financial_message(&a.timestamp, &a.address)).unwrap_err();
        assert!(matches!(err, TrustError::Authentication(_)));
    }
}
