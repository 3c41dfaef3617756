// crates/trustnet-rpc/src/lib.rs
//
// trustnet-rpc: JSON-RPC server and handlers for TrustNet.
//
// A single tonic service accepts `{method, params}` JSON bodies, gates the
// signed methods on a personal-message signature, and answers with
// `{success, code, result, error}` where the HTTP status equals `code`.

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{JsonRpcRequest, JsonRpcResponse, RpcConfig, TrustRpcServer};
