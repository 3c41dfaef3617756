// crates/trustnet-cli/src/output.rs
//
// Output formatting utilities for the TrustNet CLI.

use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data)
        .unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// One decimal place, the precision scores are displayed with.
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}
