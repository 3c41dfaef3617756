// crates/trustnet-scoring/src/lib.rs
//
// trustnet-scoring: Domain scorers and cross-domain orchestration for TrustNet.
//
// The social, document, and financial scorers live here; the reference scorer
// lives in trustnet-reputation. `TrustEngine` runs the scorers for the
// domains present in a request concurrently and combines them with the
// configured domain weights.

pub mod document;
pub mod engine;
pub mod financial;
pub mod orchestrator;
pub mod social;
pub mod stage;

pub use document::{DocumentReport, DocumentScorer, FileExtractor};
pub use engine::{ScoringHandles, TrustEngine};
pub use financial::{FinancialScorer, LogisticModel};
pub use orchestrator::combine;
pub use social::{CachedProfileFetcher, SocialScorer};
