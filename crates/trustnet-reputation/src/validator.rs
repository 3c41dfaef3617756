// crates/trustnet-reputation/src/validator.rs
//
// Reference domain scorer. Each reference gets three verification scores
// averaged into a confidence, plus a trust weight; the domain score is the
// trust-weighted mean of confidences.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use trustnet_core::{
    aggregate_with_report, Domain, DomainScore, ReferenceEvidence, ReferenceRecord, TextClassifier,
    WeightedComponent, NEUTRAL_SCORE,
};

use crate::decay::{age_years, RecencyDecay};
use crate::trust_weight::{trust_weight, RelationshipType};
use crate::verification::{identity_score, ContentChecks};

/// Confidence at or above which a reference counts as verified.
pub const VERIFIED_THRESHOLD: f64 = 70.0;

/// Verification outcome for one reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceVerification {
    pub index: usize,
    pub name: Option<String>,
    pub identity_score: f64,
    pub relationship_score: f64,
    pub content_score: f64,
    pub confidence: f64,
    pub verified: bool,
    pub trust_weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Reference domain result with the per-reference breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceReport {
    pub domain_score: DomainScore,
    pub verifications: Vec<ReferenceVerification>,
}

/// Scores a list of peer references.
#[derive(Clone)]
pub struct ReferenceValidator {
    classifier: Arc<dyn TextClassifier>,
    decay: RecencyDecay,
    timeout: Duration,
}

impl ReferenceValidator {
    pub fn new(classifier: Arc<dyn TextClassifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            decay: RecencyDecay::default(),
            timeout,
        }
    }

    pub fn with_decay(mut self, decay: RecencyDecay) -> Self {
        self.decay = decay;
        self
    }

    /// Verify one reference as seen on `today`.
    pub async fn verify_single(
        &self,
        index: usize,
        record: &ReferenceRecord,
        today: NaiveDate,
    ) -> ReferenceVerification {
        let checks = ContentChecks::new(self.classifier.as_ref(), self.timeout);
        let mut errors = Vec::new();

        let identity = identity_score(record);
        let relationship = checks.relationship_score(record, &mut errors).await;
        let content = checks.content_score(record, &mut errors).await;
        let confidence = (identity + relationship + content) / 3.0;

        let relationship_type = record
            .relationship_type
            .as_deref()
            .map(RelationshipType::parse)
            .unwrap_or(RelationshipType::Other);
        let age = record.date.map(|date| age_years(date, today));
        let weight = trust_weight(relationship_type, age, &self.decay);

        tracing::debug!(
            index,
            identity,
            relationship,
            content,
            confidence,
            weight,
            "Reference verified"
        );

        ReferenceVerification {
            index,
            name: record.name.clone(),
            identity_score: identity,
            relationship_score: relationship,
            content_score: content,
            confidence,
            verified: confidence >= VERIFIED_THRESHOLD,
            trust_weight: weight,
            errors,
        }
    }

    /// Score every reference and combine them into the reference domain score.
    ///
    /// An empty list scores 50.
    pub async fn validate(
        &self,
        evidence: &ReferenceEvidence,
        today: NaiveDate,
    ) -> ReferenceReport {
        let mut verifications = Vec::with_capacity(evidence.references.len());
        for (index, record) in evidence.references.iter().enumerate() {
            verifications.push(self.verify_single(index, record, today).await);
        }

        if verifications.is_empty() {
            let domain_score = DomainScore::new(Domain::Reference, NEUTRAL_SCORE)
                .with_detail("reference_count", 0)
                .with_detail("verified_count", 0);
            return ReferenceReport {
                domain_score,
                verifications,
            };
        }

        let components: Vec<WeightedComponent> = verifications
            .iter()
            .map(|v| {
                WeightedComponent::new(
                    format!("reference[{}]", v.index),
                    v.confidence,
                    v.trust_weight,
                )
            })
            .collect();
        let report = aggregate_with_report(&components);

        let verified_count = verifications.iter().filter(|v| v.verified).count();
        let mut domain_score = DomainScore::new(Domain::Reference, report.score)
            .with_detail("reference_count", verifications.len())
            .with_detail("verified_count", verified_count)
            .with_detail("total_trust_weight", report.total_weight)
            .with_detail("verifications", &verifications);
        for v in &verifications {
            for e in &v.errors {
                domain_score.push_error(format!("reference[{}]: {}", v.index, e));
            }
        }
        for name in report.excluded {
            domain_score.push_error(format!("excluded from aggregate: {}", name));
        }

        tracing::info!(
            references = verifications.len(),
            verified = verified_count,
            score = domain_score.score,
            "Reference domain scored"
        );

        ReferenceReport {
            domain_score,
            verifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use trustnet_core::{Classification, LabelScore, Sentiment, TrustError};

    /// Puts all mass on the first candidate label and reports strong positive sentiment.
    struct ConfidentClassifier;

    #[async_trait]
    impl TextClassifier for ConfidentClassifier {
        async fn classify(
            &self,
            _text: &str,
            labels: &[&str],
        ) -> Result<Classification, TrustError> {
            Ok(Classification::new(
                labels
                    .iter()
                    .enumerate()
                    .map(|(i, l)| LabelScore::new(*l, if i == 0 { 1.0 } else { 0.0 }))
                    .collect(),
            ))
        }

        async fn sentiment(&self, _text: &str) -> Result<Sentiment, TrustError> {
            Ok(Sentiment {
                positive: true,
                score: 1.0,
            })
        }
    }

    struct SlowClassifier;

    #[async_trait]
    impl TextClassifier for SlowClassifier {
        async fn classify(
            &self,
            _text: &str,
            _labels: &[&str],
        ) -> Result<Classification, TrustError> {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(Classification::new(vec![]))
        }

        async fn sentiment(&self, _text: &str) -> Result<Sentiment, TrustError> {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(Sentiment {
                positive: true,
                score: 1.0,
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn strong_reference() -> ReferenceRecord {
        ReferenceRecord {
            name: Some("Ada".into()),
            email: Some("ada@cs.example.edu".into()),
            social_profiles: vec![
                "https://linkedin.com/in/ada".into(),
                "https://github.com/ada".into(),
            ],
            position: Some("Engineering Director".into()),
            relationship_type: Some("manager".into()),
            relationship_duration_years: Some(4.0),
            context: Some("I managed Ada on my team for four years".into()),
            mutual_connections: Some(25),
            content: Some(
                "Ada led the 2022 Orion migration project, delivered it on budget and \
                 mentored 4 engineers on the Platform team."
                    .into(),
            ),
            date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        }
    }

    fn validator(classifier: Arc<dyn TextClassifier>) -> ReferenceValidator {
        ReferenceValidator::new(classifier, Duration::from_millis(100))
    }

    #[tokio::test]
    async fn empty_reference_list_is_neutral() {
        let v = validator(Arc::new(ConfidentClassifier));
        let report = v.validate(&ReferenceEvidence::default(), today()).await;
        assert_eq!(report.domain_score.score, 50.0);
        assert!(report.verifications.is_empty());
    }

    #[tokio::test]
    async fn strong_reference_is_verified() {
        let v = validator(Arc::new(ConfidentClassifier));
        let result = v.verify_single(0, &strong_reference(), today()).await;
        assert!(result.verified, "confidence was {}", result.confidence);
        assert!(result.errors.is_empty());
        assert!((0.1..=1.0).contains(&result.trust_weight));
    }

    #[tokio::test]
    async fn domain_score_leans_toward_heavier_reference() {
        let v = validator(Arc::new(ConfidentClassifier));
        let weak = ReferenceRecord {
            email: Some("x@mailinator.com".into()),
            relationship_type: Some("other".into()),
            relationship_duration_years: Some(60.0),
            date: Some(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()),
            ..Default::default()
        };
        let evidence = ReferenceEvidence {
            references: vec![strong_reference(), weak],
        };
        let report = v.validate(&evidence, today()).await;
        let strong = &report.verifications[0];
        let weak = &report.verifications[1];
        assert!(strong.trust_weight > weak.trust_weight);
        let plain_mean = (strong.confidence + weak.confidence) / 2.0;
        assert!(report.domain_score.score > plain_mean);
        assert_eq!(report.domain_score.details["reference_count"], 2);
    }

    #[tokio::test]
    async fn slow_classifier_degrades_each_check() {
        let v = validator(Arc::new(SlowClassifier));
        let report = v
            .validate(
                &ReferenceEvidence {
                    references: vec![strong_reference()],
                },
                today(),
            )
            .await;
        let score = report.domain_score.score;
        assert!((0.0..=100.0).contains(&score));
        assert!(report.domain_score.errors.iter().all(|e| e.contains("timed out")));
        assert_eq!(report.domain_score.errors.len(), 4);
    }
}
