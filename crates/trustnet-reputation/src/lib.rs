// crates/trustnet-reputation/src/lib.rs
//
// trustnet-reputation: Reference verification, recency decay, trust weights,
// and keyword classification for TrustNet.
//
// Each peer reference gets a confidence from three independent verifications
// (identity, relationship, content) and a trust weight that decays with the
// reference's age. The domain score is the trust-weighted mean of confidences.

pub mod classifier;
pub mod decay;
pub mod trust_weight;
pub mod validator;
pub mod verification;

pub use classifier::KeywordClassifier;
pub use decay::RecencyDecay;
pub use trust_weight::{trust_weight, RelationshipType};
pub use validator::{ReferenceReport, ReferenceValidator, ReferenceVerification};
