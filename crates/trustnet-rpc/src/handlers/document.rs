// crates/trustnet-rpc/src/handlers/document.rs
//
// Document upload handler: AnalyzeDocument.
//
// Uploaded bytes arrive base64-encoded and are written to a temporary file
// carrying the upload's extension; the file is removed when the request ends.

use std::io::Write;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use trustnet_core::{DocumentEvidence, DocumentFormat, TrustError};
use trustnet_scoring::{DocumentReport, TrustEngine};

use super::auth::{self, SignedRequest};

/// An uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    /// File content, standard base64.
    pub content_base64: String,
}

impl DocumentUpload {
    /// Write the upload to a temporary file and describe it as evidence.
    ///
    /// The returned file must outlive the scoring of the evidence.
    pub fn materialize(&self) -> Result<(NamedTempFile, DocumentEvidence), TrustError> {
        let format = DocumentFormat::from_file_name(&self.file_name)?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(self.content_base64.trim())
            .map_err(|e| {
                TrustError::Validation(format!("content_base64 is not valid base64: {}", e))
            })?;

        let mut file = tempfile::Builder::new()
            .prefix("trustnet-upload-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()?;
        file.write_all(&bytes)?;
        file.flush()?;

        let evidence = DocumentEvidence::new(self.file_name.clone(), file.path());
        Ok((file, evidence))
    }
}

// ---------------------------------------------------------------------------
// AnalyzeDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeDocumentRequest {
    #[serde(flatten)]
    pub upload: DocumentUpload,
    pub auth: Option<SignedRequest>,
}

/// Verify the document signature, then score the upload.
///
/// An unreadable document is a successful response with `overall_score` 0.
pub async fn handle_analyze_document(
    engine: &TrustEngine,
    request: AnalyzeDocumentRequest,
) -> Result<DocumentReport, TrustError> {
    let file_name = request.upload.file_name.clone();
    auth::require(request.auth.as_ref(), |a| auth::document_message(&a.timestamp, &file_name))?;

    let (_file, evidence) = request.upload.materialize()?;
    let report = engine.document().analyze(&evidence).await?;
    tracing::info!(
        file = %file_name,
        overall = report.overall_score,
        unreadable = report.is_unreadable(),
        "Document analyzed"
    );
    Ok(report)
}
