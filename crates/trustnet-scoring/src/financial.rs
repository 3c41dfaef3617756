// crates/trustnet-scoring/src/financial.rs
//
// Financial domain scorer: a fixed 10-feature vector fed through a
// prediction model whose probability is scaled to [0, 100].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use trustnet_core::features::financial;
use trustnet_core::{
    bounded, Domain, DomainScore, FinancialEvidence, FinancialModel, TrustError, NEUTRAL_SCORE,
};

use crate::stage::{recover, StageResult};

/// Neutral raw values used when a metric is missing.
pub mod defaults {
    pub const CREDIT_SCORE: f64 = 650.0;
    pub const PAYMENT_HISTORY: f64 = 0.8;
    pub const INCOME_STABILITY: f64 = 0.7;
    pub const DEBT_TO_INCOME: f64 = 0.3;
    /// Years.
    pub const ACCOUNT_AGE: f64 = 5.0;
    pub const TRANSACTION_CONSISTENCY: f64 = 0.8;
    pub const DEFAULT_RISK: f64 = 0.1;
    pub const FRAUD_RISK: f64 = 0.05;
    pub const SAVINGS_RATIO: f64 = 0.2;
    pub const INVESTMENT_DIVERSITY: f64 = 0.6;
}

/// Feature names in vector order.
pub const FEATURE_NAMES: [&str; 10] = [
    "credit_score",
    "payment_history",
    "income_stability",
    "debt_to_income",
    "account_age",
    "transaction_consistency",
    "default_risk",
    "fraud_risk",
    "savings_ratio",
    "investment_diversity",
];

/// Build the feature vector, every entry clamped to [0, 1].
///
/// Debt-to-income, default risk, and fraud risk are inverted so that higher
/// is better for every feature.
pub fn feature_vector(e: &FinancialEvidence) -> [f64; 10] {
    let raw = [
        e.credit_score.unwrap_or(defaults::CREDIT_SCORE) / financial::CREDIT_SCORE_MAX,
        e.payment_history.unwrap_or(defaults::PAYMENT_HISTORY),
        e.income_stability.unwrap_or(defaults::INCOME_STABILITY),
        1.0 - e.debt_to_income.unwrap_or(defaults::DEBT_TO_INCOME),
        e.account_age.unwrap_or(defaults::ACCOUNT_AGE) / financial::ACCOUNT_AGE_YEARS,
        e.transaction_consistency.unwrap_or(defaults::TRANSACTION_CONSISTENCY),
        1.0 - e.default_risk.unwrap_or(defaults::DEFAULT_RISK),
        1.0 - e.fraud_risk.unwrap_or(defaults::FRAUD_RISK),
        e.savings_ratio.unwrap_or(defaults::SAVINGS_RATIO),
        e.investment_diversity.unwrap_or(defaults::INVESTMENT_DIVERSITY),
    ];
    raw.map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
}

/// Deterministic logistic model with fixed coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    pub coefficients: [f64; 10],
    pub intercept: f64,
}

impl Default for LogisticModel {
    fn default() -> Self {
        Self {
            coefficients: [2.0, 2.0, 1.0, 1.0, 0.5, 1.0, 1.5, 1.5, 0.5, 0.5],
            intercept: -8.0,
        }
    }
}

impl LogisticModel {
    pub fn probability(&self, features: &[f64; 10]) -> f64 {
        let z: f64 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

#[async_trait]
impl FinancialModel for LogisticModel {
    async fn predict(&self, features: &[f64; 10]) -> Result<f64, TrustError> {
        Ok(self.probability(features))
    }
}

/// Scores financial evidence through a `FinancialModel`.
#[derive(Clone)]
pub struct FinancialScorer {
    model: Arc<dyn FinancialModel>,
    timeout: Duration,
}

impl FinancialScorer {
    pub fn new(model: Arc<dyn FinancialModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    async fn predict_score(&self, features: &[f64; 10]) -> StageResult<f64> {
        let probability =
            bounded(self.timeout, "financial model", self.model.predict(features)).await?;
        let score = probability * 100.0;
        if !(0.0..=100.0).contains(&score) {
            return Err(TrustError::Computation(format!("model score {} outside [0, 100]", score)));
        }
        Ok(score)
    }

    /// Score the financial domain. Evidence without any metric scores 50.
    pub async fn score(&self, evidence: &FinancialEvidence) -> DomainScore {
        if evidence.is_empty() {
            return DomainScore::new(Domain::Financial, NEUTRAL_SCORE)
                .with_detail("defaulted", true);
        }

        let features = feature_vector(evidence);
        let mut errors = Vec::new();
        let result = self.predict_score(&features).await;
        let score = recover("financial model", result, &mut errors);

        let feature_map: serde_json::Map<String, serde_json::Value> = FEATURE_NAMES
            .iter()
            .zip(features.iter())
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();

        let mut domain_score =
            DomainScore::new(Domain::Financial, score).with_detail("features", feature_map);
        for e in errors {
            domain_score.push_error(e);
        }
        tracing::info!(score = domain_score.score, "Financial domain scored");
        domain_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedModel(f64);

    #[async_trait]
    impl FinancialModel for FixedModel {
        async fn predict(&self, _features: &[f64; 10]) -> Result<f64, TrustError> {
            Ok(self.0)
        }
    }

    fn scorer(model: Arc<dyn FinancialModel>) -> FinancialScorer {
        FinancialScorer::new(model, Duration::from_secs(1))
    }

    #[test]
    fn defaults_fill_missing_metrics() {
        let f = feature_vector(&FinancialEvidence::default());
        assert!((f[0] - 650.0 / 850.0).abs() < 1e-12);
        assert_eq!(f[1], 0.8);
        assert!((f[3] - 0.7).abs() < 1e-12);
        assert_eq!(f[4], 0.25);
        assert!((f[6] - 0.9).abs() < 1e-12);
        assert!((f[7] - 0.95).abs() < 1e-12);
    }

    #[test]
    fn features_are_clamped() {
        let e = FinancialEvidence {
            credit_score: Some(900.0),
            debt_to_income: Some(1.5),
            account_age: Some(40.0),
            ..Default::default()
        };
        let f = feature_vector(&e);
        assert_eq!(f[0], 1.0);
        assert_eq!(f[3], 0.0);
        assert_eq!(f[4], 1.0);
    }

    #[test]
    fn logistic_model_is_monotonic() {
        let model = LogisticModel::default();
        let base = feature_vector(&FinancialEvidence::default());
        let mut better = base;
        better[0] = 1.0;
        assert!(model.probability(&better) > model.probability(&base));
    }

    #[tokio::test]
    async fn all_default_metrics_are_deterministic() {
        let s = scorer(Arc::new(LogisticModel::default()));
        let empty = FinancialEvidence::default();
        assert_eq!(s.score(&empty).await.score, 50.0);
        assert_eq!(s.score(&empty).await, s.score(&empty).await);

        let features = feature_vector(&FinancialEvidence::default());
        let first = s.predict_score(&features).await.unwrap();
        let second = s.predict_score(&features).await.unwrap();
        assert_eq!(first, second);
        assert!(first > 60.0 && first < 70.0, "score was {}", first);
    }

    #[tokio::test]
    async fn out_of_range_model_output_falls_back() {
        let s = scorer(Arc::new(FixedModel(1.7)));
        let evidence = FinancialEvidence {
            credit_score: Some(700.0),
            ..Default::default()
        };
        let score = s.score(&evidence).await;
        assert_eq!(score.score, 50.0);
        assert_eq!(score.errors.len(), 1);
    }

    #[tokio::test]
    async fn nan_model_output_falls_back() {
        let s = scorer(Arc::new(FixedModel(f64::NAN)));
        let evidence = FinancialEvidence {
            fraud_risk: Some(0.2),
            ..Default::default()
        };
        assert_eq!(s.score(&evidence).await.score, 50.0);
    }

    #[tokio::test]
    async fn model_probability_is_scaled() {
        let s = scorer(Arc::new(FixedModel(0.42)));
        let evidence = FinancialEvidence {
            savings_ratio: Some(0.5),
            ..Default::default()
        };
        assert!((s.score(&evidence).await.score - 42.0).abs() < 1e-9);
    }
}
