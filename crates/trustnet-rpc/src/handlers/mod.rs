// crates/trustnet-rpc/src/handlers/mod.rs
//
// Handler modules, one per API group. Each defines its request/response types
// and `handle_*` functions returning `Result<_, TrustError>`.

pub mod auth;
pub mod document;
pub mod financial;
pub mod node;
pub mod reference;
pub mod signature;
pub mod social;
pub mod trust;
