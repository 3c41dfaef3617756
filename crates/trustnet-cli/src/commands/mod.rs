// crates/trustnet-cli/src/commands/mod.rs
//
// Command module declarations for the TrustNet CLI.

pub mod score;
pub mod sign;
pub mod status;
pub mod wallet;
