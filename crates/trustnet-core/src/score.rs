// crates/trustnet-core/src/score.rs

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{aggregate, clamp_score};

/// One evidence category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Social,
    Document,
    Reference,
    Financial,
}

impl Domain {
    /// All domains in a fixed order.
    pub const ALL: [Domain; 4] = [
        Domain::Social,
        Domain::Document,
        Domain::Reference,
        Domain::Financial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Social => "social",
            Domain::Document => "document",
            Domain::Reference => "reference",
            Domain::Financial => "financial",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-score paired with the relative trust placed in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedComponent {
    /// Name of the sub-signal, used when reporting exclusions.
    pub name: String,
    /// Raw score; only values in [0, 100] take part in aggregation.
    pub score: f64,
    /// Relative weight; must be finite and non-negative.
    pub weight: f64,
}

impl WeightedComponent {
    pub fn new(name: impl Into<String>, score: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            score,
            weight,
        }
    }

    /// Unnamed component, mostly for tests and ad-hoc aggregation.
    pub fn anonymous(score: f64, weight: f64) -> Self {
        Self::new("component", score, weight)
    }
}

impl From<(f64, f64)> for WeightedComponent {
    fn from((score, weight): (f64, f64)) -> Self {
        Self::anonymous(score, weight)
    }
}

/// Aggregated result for one domain.
///
/// `score` is always in [0, 100]; `details` carries the sub-scores for audit,
/// `errors` the non-fatal problems met while computing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: Domain,
    pub score: f64,
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl DomainScore {
    /// Create a domain score, clamping into [0, 100] and mapping NaN to the neutral default.
    pub fn new(domain: Domain, score: f64) -> Self {
        Self {
            domain,
            score: clamp_score(score),
            details: serde_json::Map::new(),
            errors: Vec::new(),
        }
    }

    /// Attach a detail entry. Values that fail to serialize are skipped.
    pub fn with_detail(mut self, key: &str, value: impl Serialize) -> Self {
        self.insert_detail(key, value);
        self
    }

    pub fn insert_detail(&mut self, key: &str, value: impl Serialize) {
        if let Ok(v) = serde_json::to_value(value) {
            self.details.insert(key.to_string(), v);
        }
    }

    pub fn push_error(&mut self, error: impl fmt::Display) {
        self.errors.push(error.to_string());
    }
}

/// Final aggregate over the domains that actually had evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreResult {
    pub request_id: Uuid,
    pub overall: f64,
    pub details: BTreeMap<Domain, DomainScore>,
    /// Base weights renormalised over the present domains.
    pub effective_weights: BTreeMap<Domain, f64>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

impl TrustScoreResult {
    pub fn domain_score(&self, domain: Domain) -> Option<f64> {
        self.details.get(&domain).map(|d| d.score)
    }

    /// Integer scores for the ledger collaborator.
    ///
    /// `professional` combines the document and reference domains using their
    /// effective weights. Domains without evidence are written as 0.
    pub fn ledger_scores(&self) -> LedgerScores {
        let professional_parts: Vec<WeightedComponent> = [Domain::Document, Domain::Reference]
            .iter()
            .filter_map(|d| {
                let score = self.details.get(d)?.score;
                let weight = self.effective_weights.get(d).copied().unwrap_or(1.0);
                Some(WeightedComponent::new(d.as_str(), score, weight))
            })
            .collect();

        let professional = if professional_parts.is_empty() {
            0.0
        } else {
            aggregate(&professional_parts)
        };

        LedgerScores {
            overall: LedgerScores::to_ledger_int(self.overall),
            financial: LedgerScores::to_ledger_int(
                self.domain_score(Domain::Financial).unwrap_or(0.0),
            ),
            professional: LedgerScores::to_ledger_int(professional),
            social: LedgerScores::to_ledger_int(self.domain_score(Domain::Social).unwrap_or(0.0)),
        }
    }
}

/// The four integer scores persisted by the ledger collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerScores {
    pub overall: u8,
    pub financial: u8,
    pub professional: u8,
    pub social: u8,
}

impl LedgerScores {
    /// Truncate a [0, 100] score to its integer part.
    pub fn to_ledger_int(score: f64) -> u8 {
        clamp_score(score).trunc() as u8
    }

    pub fn as_array(&self) -> [u8; 4] {
        [self.overall, self.financial, self.professional, self.social]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(domains: &[(Domain, f64, f64)]) -> TrustScoreResult {
        let mut details = BTreeMap::new();
        let mut effective_weights = BTreeMap::new();
        for (d, s, w) in domains {
            details.insert(*d, DomainScore::new(*d, *s));
            effective_weights.insert(*d, *w);
        }
        TrustScoreResult {
            request_id: Uuid::now_v7(),
            overall: 71.9,
            details,
            effective_weights,
            errors: vec![],
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn domain_score_clamps_and_neutralises_nan() {
        assert_eq!(DomainScore::new(Domain::Social, 140.0).score, 100.0);
        assert_eq!(DomainScore::new(Domain::Social, -3.0).score, 0.0);
        assert_eq!(DomainScore::new(Domain::Social, f64::NAN).score, 50.0);
    }

    #[test]
    fn ledger_scores_truncate_and_zero_missing_domains() {
        let result = result_with(&[(Domain::Social, 64.7, 1.0)]);
        let ledger = result.ledger_scores();
        assert_eq!(ledger.overall, 71);
        assert_eq!(ledger.social, 64);
        assert_eq!(ledger.financial, 0);
        assert_eq!(ledger.professional, 0);
    }

    #[test]
    fn professional_combines_document_and_reference() {
        let result = result_with(&[
            (Domain::Document, 80.0, 0.5),
            (Domain::Reference, 60.0, 0.5),
        ]);
        assert_eq!(result.ledger_scores().professional, 70);
    }

    #[test]
    fn domain_serializes_lowercase() {
        let json = serde_json::to_string(&Domain::Financial).unwrap();
        assert_eq!(json, "\"financial\"");
    }
}
