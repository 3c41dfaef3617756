// crates/trustnet-scoring/src/document/mod.rs
//
// Document domain scorer.
//
// Pipeline: extract text → lexical statistics → content scores → reliability →
// overall. Every stage after extraction degrades to a neutral value instead of
// aborting; an unreadable document yields an overall score of 0.

pub mod content;
pub mod reliability;
pub mod stats;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use trustnet_core::{
    bounded, Domain, DomainScore, DocumentEvidence, DocumentExtractor, DocumentFormat,
    TextClassifier, TrustError,
};

use content::{ContentScores, QualityBreakdown};
use stats::DocumentStats;

/// Error reported for a document whose text could not be extracted.
pub const UNREADABLE_MESSAGE: &str = "Document content could not be read";

/// Audit breakdown of a scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDetails {
    pub document_stats: DocumentStats,
    pub quality: QualityBreakdown,
    pub content_analysis: ContentScores,
    pub reliability_score: f64,
    pub stats_score: f64,
}

/// Result of a document analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DocumentDetails>,
    /// Terminal error, set when no text could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Non-fatal errors met by individual stages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl DocumentReport {
    pub fn unreadable(errors: Vec<String>) -> Self {
        Self {
            overall_score: 0.0,
            details: None,
            error: Some(UNREADABLE_MESSAGE.to_string()),
            errors,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_domain_score(&self) -> DomainScore {
        let mut score = DomainScore::new(Domain::Document, self.overall_score);
        if let Some(details) = &self.details {
            score.insert_detail("document_stats", &details.document_stats);
            score.insert_detail("quality", &details.quality);
            score.insert_detail("content_analysis", &details.content_analysis);
            score.insert_detail("reliability_score", details.reliability_score);
            score.insert_detail("stats_score", details.stats_score);
        }
        if let Some(error) = &self.error {
            score.push_error(error);
        }
        for e in &self.errors {
            score.push_error(e);
        }
        score
    }
}

/// Reads plain-text documents from disk.
///
/// `pdf` and `docx` are reported as unreadable; inject another
/// `DocumentExtractor` to support them.
#[derive(Debug, Default, Clone)]
pub struct FileExtractor;

#[async_trait]
impl DocumentExtractor for FileExtractor {
    async fn extract(
        &self,
        path: &Path,
        format: DocumentFormat,
    ) -> Result<Option<String>, TrustError> {
        match format {
            DocumentFormat::Txt => {
                let bytes = tokio::fs::read(path).await?;
                match String::from_utf8(bytes) {
                    Ok(text) => Ok(Some(text)),
                    Err(_) => {
                        tracing::warn!(path = %path.display(), "Text document is not valid UTF-8");
                        Ok(None)
                    }
                }
            }
            DocumentFormat::Pdf | DocumentFormat::Docx => {
                tracing::warn!(format = format.extension(), "No extractor available for format");
                Ok(None)
            }
        }
    }
}

/// Scores document evidence.
#[derive(Clone)]
pub struct DocumentScorer {
    extractor: Arc<dyn DocumentExtractor>,
    classifier: Arc<dyn TextClassifier>,
    timeout: Duration,
}

impl DocumentScorer {
    pub fn new(
        extractor: Arc<dyn DocumentExtractor>,
        classifier: Arc<dyn TextClassifier>,
        timeout: Duration,
    ) -> Self {
        Self {
            extractor,
            classifier,
            timeout,
        }
    }

    /// Analyse one document.
    ///
    /// Fails only with `UnsupportedFormat`; an extraction failure is reported
    /// through [`DocumentReport::unreadable`].
    pub async fn analyze(&self, evidence: &DocumentEvidence) -> Result<DocumentReport, TrustError> {
        let format = evidence.format()?;
        let extraction = self.extractor.extract(&evidence.path, format);
        let extracted = bounded(self.timeout, "text extraction", extraction).await;
        let text = match extracted {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::info!(file = %evidence.file_name, "Document has no readable content");
                return Ok(DocumentReport::unreadable(Vec::new()));
            }
            Err(e) => {
                tracing::warn!(file = %evidence.file_name, error = %e, "Text extraction failed");
                return Ok(DocumentReport::unreadable(vec![format!("text extraction: {}", e)]));
            }
        };
        Ok(self.analyze_text(&text).await)
    }

    /// Score already-extracted text.
    pub async fn analyze_text(&self, text: &str) -> DocumentReport {
        let mut errors = Vec::new();

        let document_stats = DocumentStats::compute(text);
        let quality = QualityBreakdown::compute(text, &document_stats);
        let content_analysis =
            content::analyze(self.classifier.as_ref(), self.timeout, text, &quality, &mut errors)
                .await;
        let reliability_score = reliability::reliability_score(&document_stats);
        let stats_score = reliability::stats_score(&document_stats);
        let overall_score =
            reliability::overall_score(content_analysis.mean(), reliability_score, stats_score);

        tracing::debug!(
            words = document_stats.word_count,
            paragraphs = document_stats.paragraph_count,
            reliability_score,
            stats_score,
            overall_score,
            "Document scored"
        );

        DocumentReport {
            overall_score,
            details: Some(DocumentDetails {
                document_stats,
                quality,
                content_analysis,
                reliability_score,
                stats_score,
            }),
            error: None,
            errors,
        }
    }

    /// Analyse and convert to the document domain score.
    pub async fn score(&self, evidence: &DocumentEvidence) -> Result<DomainScore, TrustError> {
        Ok(self.analyze(evidence).await?.to_domain_score())
    }
}
