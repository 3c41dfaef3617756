// crates/trustnet-core/src/lib.rs
//
// trustnet-core: Core types, aggregation, and signature verification for TrustNet.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the evidence bundles, score types, error taxonomy, the single
// weighted aggregation path, saturating-ratio features, collaborator traits,
// and the personal-message signature verifier.

pub mod aggregate;
pub mod config;
pub mod crypto;
pub mod error;
pub mod evidence;
pub mod features;
pub mod score;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use trustnet_core::DomainScore;`

// Aggregation
pub use aggregate::{
    aggregate, aggregate_with_report, unweighted_mean, AggregateReport, NEUTRAL_SCORE,
};

// Configuration
pub use config::{DomainWeights, ScoringConfig};

// Evidence types
pub use evidence::{
    DocumentEvidence, DocumentFormat, EvidenceBundle, EvidenceSet, FinancialEvidence,
    LinkedInProfile, ReferenceEvidence, ReferenceRecord, SocialEvidence, TwitterProfile,
};

// Score types
pub use score::{Domain, DomainScore, LedgerScores, TrustScoreResult, WeightedComponent};

// Error type
pub use error::TrustError;

// Traits
pub use traits::{
    bounded, Classification, DocumentExtractor, FinancialModel, LabelScore, LedgerWriter,
    ProfileFetcher, Sentiment, TextClassifier,
};
