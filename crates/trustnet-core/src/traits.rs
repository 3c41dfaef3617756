// crates/trustnet-core/src/traits.rs
//
// Collaborator contracts consumed by the scoring core as black boxes.
// Implementations are injected as process-scoped handles; nothing here is a
// global singleton.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TrustError;
use crate::evidence::{DocumentFormat, LinkedInProfile, TwitterProfile};
use crate::score::LedgerScores;

/// One label with its classifier confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Ranked multi-label classification result, highest score first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub ranked: Vec<LabelScore>,
}

impl Classification {
    /// Build a classification, sorting the labels by descending score.
    pub fn new(mut ranked: Vec<LabelScore>) -> Self {
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Self { ranked }
    }

    pub fn top(&self) -> Option<&LabelScore> {
        self.ranked.first()
    }

    /// Score of one label, 0.0 when absent.
    pub fn score_of(&self, label: &str) -> f64 {
        self.ranked
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.score)
            .unwrap_or(0.0)
    }

    /// Summed score of a label set.
    pub fn sum_of(&self, labels: &[&str]) -> f64 {
        labels.iter().map(|l| self.score_of(l)).sum()
    }
}

/// Binary sentiment with confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: bool,
    pub score: f64,
}

/// Text and sentiment classifier (zero-shot style).
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Rank `candidate_labels` for `text`.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Classification, TrustError>;

    /// POSITIVE/NEGATIVE sentiment of `text`.
    async fn sentiment(&self, text: &str) -> Result<Sentiment, TrustError>;
}

/// Plain-text extraction from an uploaded document.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Returns `Ok(None)` when the content cannot be read.
    async fn extract(
        &self,
        path: &Path,
        format: DocumentFormat,
    ) -> Result<Option<String>, TrustError>;
}

/// Social-profile fetcher. `Ok(None)` means the profile was not found.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch_twitter(&self, username: &str) -> Result<Option<TwitterProfile>, TrustError>;

    async fn fetch_linkedin(&self, profile_id: &str) -> Result<Option<LinkedInProfile>, TrustError>;
}

/// Financial prediction model over the 10-feature vector.
#[async_trait]
pub trait FinancialModel: Send + Sync {
    /// Probability in [0, 1] that the subject is financially reliable.
    async fn predict(&self, features: &[f64; 10]) -> Result<f64, TrustError>;
}

/// Ledger collaborator that persists the four integer scores for an address.
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    async fn submit(&self, address: &str, scores: &LedgerScores) -> Result<bool, TrustError>;
}

/// Run a collaborator call with an upper time bound.
///
/// A timeout becomes `TrustError::Collaborator` so the caller can fall back.
pub async fn bounded<T, F>(timeout: Duration, what: &str, call: F) -> Result<T, TrustError>
where
    F: Future<Output = Result<T, TrustError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(TrustError::Collaborator(format!(
            "{} timed out after {} ms",
            what,
            timeout.as_millis()
        ))),
    }
}
