// crates/trustnet-core/src/config.rs
//
// Scoring configuration: cross-domain base weights and collaborator timeouts.
// Embedded in the daemon's TOML file under `[scoring]`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::score::Domain;

/// Base weights for the cross-domain aggregate.
///
/// Only the domains present in a request take part; their weights are
/// renormalised to sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainWeights {
    #[serde(default = "default_financial_weight")]
    pub financial: f64,
    #[serde(default = "default_social_weight")]
    pub social: f64,
    #[serde(default = "default_document_weight")]
    pub document: f64,
    #[serde(default = "default_reference_weight")]
    pub reference: f64,
}

fn default_financial_weight() -> f64 {
    0.35
}

fn default_social_weight() -> f64 {
    0.25
}

fn default_document_weight() -> f64 {
    0.2
}

fn default_reference_weight() -> f64 {
    0.2
}

impl Default for DomainWeights {
    fn default() -> Self {
        Self {
            financial: default_financial_weight(),
            social: default_social_weight(),
            document: default_document_weight(),
            reference: default_reference_weight(),
        }
    }
}

impl DomainWeights {
    pub fn weight(&self, domain: Domain) -> f64 {
        match domain {
            Domain::Financial => self.financial,
            Domain::Social => self.social,
            Domain::Document => self.document,
            Domain::Reference => self.reference,
        }
    }
}

/// Scoring configuration shared by all domain scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub domain_weights: DomainWeights,

    /// Upper bound for a single classifier or model call, in milliseconds.
    #[serde(default = "default_collaborator_timeout_ms")]
    pub collaborator_timeout_ms: u64,
}

fn default_collaborator_timeout_ms() -> u64 {
    5000
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            domain_weights: DomainWeights::default(),
            collaborator_timeout_ms: default_collaborator_timeout_ms(),
        }
    }
}

impl ScoringConfig {
    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_millis(self.collaborator_timeout_ms)
    }
}
