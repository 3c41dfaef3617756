// crates/trustnet-rpc/src/middleware.rs
//
// Request logging for the RPC server.

use std::time::Duration;

use tonic::{Request, Status};

/// Logs the metadata of each incoming request.
pub fn logging_interceptor(req: Request<()>) -> Result<Request<()>, Status> {
    tracing::info!("Incoming RPC request: {:?}", req.metadata());
    Ok(req)
}

/// Log the outcome of one dispatched method.
pub fn log_outcome(method: &str, code: u16, elapsed: Duration) {
    let elapsed_ms = elapsed.as_millis() as u64;
    match code {
        200 => tracing::info!(method, code, elapsed_ms, "RPC call completed"),
        400..=499 => tracing::warn!(method, code, elapsed_ms, "RPC call rejected"),
        _ => tracing::error!(method, code, elapsed_ms, "RPC call failed"),
    }
}
