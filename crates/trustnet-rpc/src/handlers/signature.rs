// crates/trustnet-rpc/src/handlers/signature.rs
//
// Standalone signature check: VerifySignature.

use serde::{Deserialize, Serialize};

use trustnet_core::{crypto, TrustError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySignatureRequest {
    pub message: String,
    pub signature: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySignatureResponse {
    pub valid: bool,
    /// Address the signature recovers to, when recovery succeeds.
    pub recovered_address: Option<String>,
}

/// Never fails: a malformed signature is reported as `valid: false`.
pub async fn handle_verify_signature(
    request: VerifySignatureRequest,
) -> Result<VerifySignatureResponse, TrustError> {
    let valid = crypto::verify_signature(&request.message, &request.signature, &request.address);
    let recovered_address = crypto::recover_address(&request.message, &request.signature).ok();
    Ok(VerifySignatureResponse {
        valid,
        recovered_address,
    })
}
