// crates/trustnet-rpc/src/handlers/financial.rs
//
// Financial scoring handler: ScoreFinancial.

use serde::{Deserialize, Serialize};

use trustnet_core::{DomainScore, FinancialEvidence, TrustError};
use trustnet_scoring::TrustEngine;

use super::auth::{self, SignedRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFinancialRequest {
    #[serde(default)]
    pub evidence: FinancialEvidence,
    pub auth: Option<SignedRequest>,
}

/// Verify the financial signature, validate, and score.
pub async fn handle_score_financial(
    engine: &TrustEngine,
    request: ScoreFinancialRequest,
) -> Result<DomainScore, TrustError> {
    let signer = auth::require(request.auth.as_ref(), |a| {
        auth::financial_message(&a.timestamp, &a.address)
    })?;
    request.evidence.validate()?;
    let score = engine.financial().score(&request.evidence).await;
    tracing::info!(address = %signer.address, score = score.score, "Financial score computed");
    Ok(score)
}
