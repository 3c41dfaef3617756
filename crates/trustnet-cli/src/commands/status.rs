// crates/trustnet-cli/src/commands/status.rs
//
// `trustnet status`: query the daemon's node/health method.

use serde::Deserialize;
use tabled::Tabled;

use crate::output::{format_json, format_table, OutputFormat};
use crate::rpc_client::rpc_call;

#[derive(Debug, Deserialize)]
struct HealthResult {
    status: String,
    version: String,
    uptime_seconds: u64,
    fetcher_configured: bool,
    ledger_configured: bool,
    collaborator_timeout_ms: u64,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub async fn run(
    rpc_endpoint: &str,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = rpc_call(rpc_endpoint, "node/health", serde_json::json!({})).await?;

    if !response.success {
        let msg = response.error.unwrap_or_else(|| "Unknown error".to_string());
        return Err(format!("RPC error ({}): {}", response.code, msg).into());
    }

    let result = response.result.unwrap_or_default();
    match format {
        OutputFormat::Json => println!("{}", format_json(&result)),
        OutputFormat::Table => {
            let health: HealthResult = serde_json::from_value(result)?;
            println!("{}", format_table(&status_rows(&health)));
        }
    }
    Ok(())
}

fn status_rows(health: &HealthResult) -> Vec<StatusRow> {
    let row = |field: &str, value: String| StatusRow {
        field: field.to_string(),
        value,
    };
    vec![
        row("Status", health.status.clone()),
        row("Version", health.version.clone()),
        row("Uptime (s)", health.uptime_seconds.to_string()),
        row("Profile fetcher", yes_no(health.fetcher_configured)),
        row("Ledger", yes_no(health.ledger_configured)),
        row("Collaborator timeout (ms)", health.collaborator_timeout_ms.to_string()),
    ]
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "configured" } else { "not configured" };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_rows_render() {
        let health: HealthResult = serde_json::from_value(serde_json::json!({
            "status": "healthy",
            "version": "0.1.0",
            "uptime_seconds": 12,
            "fetcher_configured": true,
            "ledger_configured": false,
            "collaborator_timeout_ms": 5000,
        }))
        .unwrap();
        let table = format_table(&status_rows(&health));
        assert!(table.contains("healthy"));
        assert!(table.contains("not configured"));
    }
}
