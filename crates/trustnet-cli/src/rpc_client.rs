// crates/trustnet-cli/src/rpc_client.rs
//
// Lightweight JSON-RPC client that POSTs to the trustnet-daemon endpoint.

use trustnet_rpc::{JsonRpcRequest, JsonRpcResponse};

/// Send a JSON-RPC call and return the parsed envelope.
///
/// Non-200 statuses still carry an envelope; the caller inspects `success`.
pub async fn rpc_call(
    endpoint: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<JsonRpcResponse, Box<dyn std::error::Error>> {
    let request = JsonRpcRequest {
        method: method.to_string(),
        params,
    };

    let client = reqwest::Client::new();
    let resp = client.post(endpoint).json(&request).send().await?;

    let rpc_response: JsonRpcResponse = resp.json().await?;
    Ok(rpc_response)
}
