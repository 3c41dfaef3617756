// crates/trustnet-reputation/src/trust_weight.rs
//
// Per-reference trust weight: relationship multiplier times recency decay,
// clamped to [0.1, 1.0].

use serde::{Deserialize, Serialize};

use crate::decay::RecencyDecay;

/// Lowest weight a reference can carry.
pub const MIN_TRUST_WEIGHT: f64 = 0.1;

/// Highest weight a reference can carry.
pub const MAX_TRUST_WEIGHT: f64 = 1.0;

/// How the referee knows the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Manager,
    DirectSupervisor,
    Colleague,
    Client,
    Other,
}

impl RelationshipType {
    /// Parse a free-form relationship label. Unknown labels map to `Other`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "manager" => RelationshipType::Manager,
            "direct_supervisor" | "supervisor" => RelationshipType::DirectSupervisor,
            "colleague" => RelationshipType::Colleague,
            "client" => RelationshipType::Client,
            _ => RelationshipType::Other,
        }
    }

    /// Trust multiplier for this relationship.
    pub fn multiplier(&self) -> f64 {
        match self {
            RelationshipType::Manager | RelationshipType::DirectSupervisor => 1.2,
            RelationshipType::Colleague => 1.0,
            RelationshipType::Client => 0.9,
            RelationshipType::Other => 0.8,
        }
    }
}

/// Trust weight of a reference.
///
/// `age_years = None` (undated) applies no decay.
pub fn trust_weight(
    relationship: RelationshipType,
    age_years: Option<f64>,
    decay: &RecencyDecay,
) -> f64 {
    let recency = age_years.map(|age| decay.factor(age)).unwrap_or(1.0);
    (relationship.multiplier() * recency).clamp(MIN_TRUST_WEIGHT, MAX_TRUST_WEIGHT)
}
