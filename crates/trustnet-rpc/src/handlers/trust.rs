// crates/trustnet-rpc/src/handlers/trust.rs
//
// Composite scoring handler: ScoreTrust.
//
// A signature over the trust-score message is required when financial or
// document evidence is present, or when the caller asks for a ledger write.

use serde::{Deserialize, Serialize};

use trustnet_core::{
    EvidenceSet, FinancialEvidence, ReferenceEvidence, SocialEvidence, TrustError, TrustScoreResult,
};
use trustnet_scoring::TrustEngine;

use super::auth::{self, SignedRequest};
use super::document::DocumentUpload;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTrustRequest {
    pub social: Option<SocialEvidence>,
    pub document: Option<DocumentUpload>,
    pub references: Option<ReferenceEvidence>,
    pub financial: Option<FinancialEvidence>,
    pub auth: Option<SignedRequest>,
    /// Write the ledger scores for the signer's address after scoring.
    #[serde(default)]
    pub submit_to_ledger: bool,
}

impl ScoreTrustRequest {
    pub fn requires_signature(&self) -> bool {
        self.document.is_some() || self.financial.is_some() || self.submit_to_ledger
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTrustResponse {
    #[serde(flatten)]
    pub result: TrustScoreResult,
    /// `None` when no ledger write was requested.
    pub ledger_submitted: Option<bool>,
}

/// Score every supplied domain and optionally write the ledger scores.
///
/// A failed ledger write is reported as `ledger_submitted: false` plus an
/// error entry; the computed score is still returned.
pub async fn handle_score_trust(
    engine: &TrustEngine,
    request: ScoreTrustRequest,
) -> Result<ScoreTrustResponse, TrustError> {
    let signer = if request.requires_signature() {
        let signer = auth::require(request.auth.as_ref(), |a| {
            auth::trust_score_message(&a.timestamp, &a.address)
        })?;
        Some(signer.address.clone())
    } else {
        None
    };

    // The temporary file must live until scoring finishes.
    let (_upload, document) = match &request.document {
        Some(upload) => {
            let (file, evidence) = upload.materialize()?;
            (Some(file), Some(evidence))
        }
        None => (None, None),
    };

    let evidence = EvidenceSet {
        social: request.social,
        document,
        references: request.references,
        financial: request.financial,
    };
    let mut result = engine.score(&evidence).await?;

    let ledger_submitted = match (request.submit_to_ledger, signer) {
        (true, Some(address)) => match engine.submit_to_ledger(&address, &result).await {
            Ok(submitted) => Some(submitted),
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "Ledger submission failed");
                result.errors.push(format!("ledger: {}", e));
                Some(false)
            }
        },
        _ => None,
    };

    Ok(ScoreTrustResponse {
        result,
        ledger_submitted,
    })
}
