// crates/trustnet-rpc/src/handlers/node.rs
//
// Health handler: GetHealth.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use trustnet_core::TrustError;
use trustnet_scoring::TrustEngine;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetHealthRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHealthResponse {
    /// Always "healthy" while the server answers.
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Whether a profile fetcher is wired in.
    pub fetcher_configured: bool,
    /// Whether a ledger writer is wired in.
    pub ledger_configured: bool,
    pub collaborator_timeout_ms: u64,
}

pub async fn handle_get_health(
    _request: GetHealthRequest,
    engine: &TrustEngine,
    start_time: Instant,
) -> Result<GetHealthResponse, TrustError> {
    Ok(GetHealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: start_time.elapsed().as_secs(),
        fetcher_configured: engine.handles().fetcher.is_some(),
        ledger_configured: engine.handles().ledger.is_some(),
        collaborator_timeout_ms: engine.config().collaborator_timeout_ms,
    })
}
