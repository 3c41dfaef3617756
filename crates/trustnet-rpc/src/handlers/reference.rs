// crates/trustnet-rpc/src/handlers/reference.rs
//
// Reference validation handler: ValidateReferences.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use trustnet_core::{ReferenceEvidence, ReferenceRecord, TrustError};
use trustnet_reputation::ReferenceReport;
use trustnet_scoring::TrustEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateReferencesRequest {
    #[serde(default)]
    pub references: Vec<ReferenceRecord>,
}

/// Score a reference list as of today. An empty list scores 50.
pub async fn handle_validate_references(
    engine: &TrustEngine,
    request: ValidateReferencesRequest,
) -> Result<ReferenceReport, TrustError> {
    let evidence = ReferenceEvidence {
        references: request.references,
    };
    evidence.validate()?;
    let report = engine.reference().validate(&evidence, Utc::now().date_naive()).await;
    tracing::info!(
        references = report.verifications.len(),
        score = report.domain_score.score,
        "References validated"
    );
    Ok(report)
}
