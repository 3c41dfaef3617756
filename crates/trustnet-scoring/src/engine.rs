// crates/trustnet-scoring/src/engine.rs
//
// TrustEngine: validates an evidence set, runs the scorers of the present
// domains concurrently, and combines them.
//
// Collaborators are process-scoped handles built once by the host (daemon or
// CLI) and passed in here; nothing is looked up globally.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use trustnet_core::{
    bounded, DocumentExtractor, DomainScore, EvidenceBundle, EvidenceSet, FinancialModel,
    LedgerWriter, ProfileFetcher, ScoringConfig, TextClassifier, TrustError, TrustScoreResult,
};
use trustnet_reputation::{KeywordClassifier, ReferenceValidator};

use crate::document::{DocumentScorer, FileExtractor};
use crate::financial::{FinancialScorer, LogisticModel};
use crate::orchestrator::combine;
use crate::social::SocialScorer;

/// Collaborator handles shared by every scorer.
#[derive(Clone)]
pub struct ScoringHandles {
    pub classifier: Arc<dyn TextClassifier>,
    pub extractor: Arc<dyn DocumentExtractor>,
    pub model: Arc<dyn FinancialModel>,
    pub fetcher: Option<Arc<dyn ProfileFetcher>>,
    pub ledger: Option<Arc<dyn LedgerWriter>>,
}

impl ScoringHandles {
    /// In-process collaborators only: keyword classifier, plain-text
    /// extractor, logistic model; no fetcher and no ledger.
    pub fn offline() -> Self {
        Self {
            classifier: Arc::new(KeywordClassifier::new()),
            extractor: Arc::new(FileExtractor),
            model: Arc::new(LogisticModel::default()),
            fetcher: None,
            ledger: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn TextClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_model(mut self, model: Arc<dyn FinancialModel>) -> Self {
        self.model = model;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn ProfileFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_ledger(mut self, ledger: Arc<dyn LedgerWriter>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Release the handles. Outstanding clones held by in-flight requests
    /// keep their collaborators alive until they finish.
    pub fn shutdown(self) {
        tracing::info!(
            fetcher = self.fetcher.is_some(),
            ledger = self.ledger.is_some(),
            "Releasing scoring handles"
        );
    }
}

/// Scores evidence sets end to end.
#[derive(Clone)]
pub struct TrustEngine {
    handles: ScoringHandles,
    config: ScoringConfig,
    social: SocialScorer,
    document: DocumentScorer,
    reference: ReferenceValidator,
    financial: FinancialScorer,
}

impl TrustEngine {
    pub fn new(handles: ScoringHandles, config: ScoringConfig) -> Self {
        let timeout = config.collaborator_timeout();
        Self {
            social: SocialScorer::new(handles.classifier.clone(), timeout),
            document: DocumentScorer::new(
                handles.extractor.clone(),
                handles.classifier.clone(),
                timeout,
            ),
            reference: ReferenceValidator::new(handles.classifier.clone(), timeout),
            financial: FinancialScorer::new(handles.model.clone(), timeout),
            handles,
            config,
        }
    }

    pub fn handles(&self) -> &ScoringHandles {
        &self.handles
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn social(&self) -> &SocialScorer {
        &self.social
    }

    pub fn document(&self) -> &DocumentScorer {
        &self.document
    }

    pub fn reference(&self) -> &ReferenceValidator {
        &self.reference
    }

    pub fn financial(&self) -> &FinancialScorer {
        &self.financial
    }

    /// Score every present domain concurrently and combine the results.
    ///
    /// Validation and unsupported-format errors abort the request; every other
    /// failure is already folded into the domain scores.
    pub async fn score(&self, evidence: &EvidenceSet) -> Result<TrustScoreResult, TrustError> {
        evidence.validate()?;
        let request_id = Uuid::now_v7();
        let today = Utc::now().date_naive();
        tracing::info!(request_id = %request_id, domains = ?evidence.domains(), "Scoring request");

        let (social, document, reference, financial) = tokio::join!(
            async {
                match &evidence.social {
                    Some(e) => Some(self.social.score(e).await),
                    None => None,
                }
            },
            async {
                match &evidence.document {
                    Some(e) => Some(self.document.score(e).await),
                    None => None,
                }
            },
            async {
                match &evidence.references {
                    Some(e) => Some(self.reference.validate(e, today).await.domain_score),
                    None => None,
                }
            },
            async {
                match &evidence.financial {
                    Some(e) => Some(self.financial.score(e).await),
                    None => None,
                }
            },
        );

        let mut scores: Vec<DomainScore> = Vec::with_capacity(4);
        if let Some(s) = social {
            scores.push(s?);
        }
        if let Some(d) = document {
            scores.push(d?);
        }
        scores.extend(reference);
        scores.extend(financial);

        combine(scores, &self.config.domain_weights, request_id)
    }

    /// Collect tagged bundles into a set and score it.
    pub async fn score_bundles(
        &self,
        bundles: Vec<EvidenceBundle>,
    ) -> Result<TrustScoreResult, TrustError> {
        let set = EvidenceSet::from_bundles(bundles)?;
        self.score(&set).await
    }

    /// Persist the ledger scores of `result` for `address`.
    ///
    /// Fails with `Collaborator` when no ledger is configured or the write
    /// fails; the caller decides whether that is fatal.
    pub async fn submit_to_ledger(
        &self,
        address: &str,
        result: &TrustScoreResult,
    ) -> Result<bool, TrustError> {
        let ledger = self
            .handles
            .ledger
            .as_ref()
            .ok_or_else(|| TrustError::Collaborator("no ledger writer configured".to_string()))?;
        let scores = result.ledger_scores();
        let submitted = bounded(
            self.config.collaborator_timeout(),
            "ledger submit",
            ledger.submit(address, &scores),
        )
        .await?;
        tracing::info!(address, submitted, scores = ?scores.as_array(), "Ledger submission");
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use trustnet_core::{
        Classification, Domain, FinancialEvidence, LedgerScores, Sentiment, SocialEvidence,
        TwitterProfile,
    };

    struct HangingClassifier;

    #[async_trait]
    impl TextClassifier for HangingClassifier {
        async fn classify(
            &self,
            _text: &str,
            _labels: &[&str],
        ) -> Result<Classification, TrustError> {
            std::future::pending().await
        }

        async fn sentiment(&self, _text: &str) -> Result<Sentiment, TrustError> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct RecordingLedger {
        written: Mutex<Vec<(String, LedgerScores)>>,
    }

    #[async_trait]
    impl LedgerWriter for RecordingLedger {
        async fn submit(&self, address: &str, scores: &LedgerScores) -> Result<bool, TrustError> {
            if let Ok(mut w) = self.written.lock() {
                w.push((address.to_string(), *scores));
            }
            Ok(true)
        }
    }

    fn social_evidence() -> SocialEvidence {
        SocialEvidence {
            twitter: Some(TwitterProfile {
                username: "jane".into(),
                followers: 800,
                account_age_years: 3.0,
                engagement_rate: 0.0005,
                recent_tweets: vec!["Sharing our engineering team's release report".into()],
                ..Default::default()
            }),
            linkedin: None,
        }
    }

    fn fast_config() -> ScoringConfig {
        ScoringConfig {
            collaborator_timeout_ms: 50,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_evidence_is_rejected() {
        let engine = TrustEngine::new(ScoringHandles::offline(), ScoringConfig::default());
        let err = engine.score(&EvidenceSet::default()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn social_only_overall_equals_social_score() {
        let engine = TrustEngine::new(ScoringHandles::offline(), ScoringConfig::default());
        let evidence = EvidenceSet {
            social: Some(social_evidence()),
            ..Default::default()
        };
        let result = engine.score(&evidence).await.unwrap();
        assert_eq!(result.effective_weights[&Domain::Social], 1.0);
        assert_eq!(Some(result.overall), result.domain_score(Domain::Social));
    }

    #[tokio::test]
    async fn hanging_classifier_degrades_instead_of_blocking() {
        let handles = ScoringHandles::offline().with_classifier(Arc::new(HangingClassifier));
        let engine = TrustEngine::new(handles, fast_config());
        let evidence = EvidenceSet {
            social: Some(social_evidence()),
            financial: Some(FinancialEvidence {
                credit_score: Some(720.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = tokio::time::timeout(Duration::from_secs(5), engine.score(&evidence))
            .await
            .expect("engine must not block")
            .unwrap();
        assert!((0.0..=100.0).contains(&result.overall));
        assert!(result.errors.iter().any(|e| e.starts_with("social: ") && e.contains("timed out")));
        assert_eq!(result.details.len(), 2);
    }

    #[tokio::test]
    async fn ledger_receives_truncated_scores() {
        let ledger = Arc::new(RecordingLedger::default());
        let handles = ScoringHandles::offline().with_ledger(ledger.clone());
        let engine = TrustEngine::new(handles, ScoringConfig::default());
        let evidence = EvidenceSet {
            social: Some(social_evidence()),
            ..Default::default()
        };
        let result = engine.score(&evidence).await.unwrap();
        assert!(engine.submit_to_ledger("0xabc", &result).await.unwrap());

        let written = ledger.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1.overall, result.overall.trunc() as u8);
        assert_eq!(written[0].1.financial, 0);
    }

    #[tokio::test]
    async fn missing_ledger_is_collaborator_error() {
        let engine = TrustEngine::new(ScoringHandles::offline(), ScoringConfig::default());
        let evidence = EvidenceSet {
            social: Some(social_evidence()),
            ..Default::default()
        };
        let result = engine.score(&evidence).await.unwrap();
        let err = engine.submit_to_ledger("0xabc", &result).await.unwrap_err();
        assert!(matches!(err, TrustError::Collaborator(_)));
    }
}
