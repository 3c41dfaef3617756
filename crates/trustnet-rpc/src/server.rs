// crates/trustnet-rpc/src/server.rs
//
// RPC server setup: TrustRpcServer and RpcConfig.
//
// A single tonic service accepts JSON-encoded `{method, params}` requests,
// dispatches them to the handlers, and answers with a JSON envelope whose
// `code` is also the HTTP status of the response.

use std::time::Instant;

use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use tonic::transport::Server;
use tonic::Status;

use trustnet_core::TrustError;
use trustnet_scoring::TrustEngine;

use crate::handlers;
use crate::middleware;

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50061,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The RPC method to invoke (e.g., "trust/score", "signature/verify").
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub success: bool,
    /// HTTP-equivalent status: 200, 400, 401, or 500.
    pub code: u16,
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl JsonRpcResponse {
    pub fn ok(value: serde_json::Value) -> Self {
        Self {
            success: true,
            code: 200,
            result: Some(value),
            error: None,
        }
    }

    pub fn from_error(err: &TrustError) -> Self {
        Self {
            success: false,
            code: err.status_code(),
            result: None,
            error: Some(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// TrustRpcServer
// ---------------------------------------------------------------------------

/// The RPC front end of a `TrustEngine`.
#[derive(Clone)]
pub struct TrustRpcServer {
    config: RpcConfig,
    service: TrustServiceImpl,
}

impl std::fmt::Debug for TrustRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustRpcServer").field("config", &self.config).finish()
    }
}

impl TrustRpcServer {
    pub fn new(config: RpcConfig, engine: TrustEngine) -> Self {
        Self {
            config,
            service: TrustServiceImpl {
                engine,
                start_time: Instant::now(),
            },
        }
    }

    /// Set the daemon start time for uptime reporting.
    pub fn with_start_time(mut self, start_time: Instant) -> Self {
        self.service.start_time = start_time;
        self
    }

    pub fn engine(&self) -> &TrustEngine {
        &self.service.engine
    }

    /// Dispatch one request without going through the transport.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        self.service.dispatch(request).await
    }

    /// Bind to the configured address and serve until the process ends.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `signal` resolves.
    pub async fn serve_with_shutdown<F>(&self, signal: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: std::future::Future<Output = ()>,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        tracing::info!("TrustNet RPC server starting on {}", addr);

        Server::builder()
            .accept_http1(true)
            .add_service(tonic::service::interceptor::InterceptedService::new(
                TrustJsonRpcServer::new(self.service.clone()),
                middleware::logging_interceptor,
            ))
            .serve_with_shutdown(addr, signal)
            .await?;

        tracing::info!("TrustNet RPC server stopped");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct TrustServiceImpl {
    engine: TrustEngine,
    start_time: Instant,
}

impl TrustServiceImpl {
    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let started = Instant::now();
        let engine = &self.engine;

        let result = match request.method.as_str() {
            "trust/score" => {
                dispatch_handler(request.params, |r| handlers::trust::handle_score_trust(engine, r))
                    .await
            }
            "social/analyze" => {
                dispatch_handler(request.params, |r| {
                    handlers::social::handle_analyze_social(engine, r)
                })
                .await
            }
            "document/analyze" => {
                dispatch_handler(request.params, |r| {
                    handlers::document::handle_analyze_document(engine, r)
                })
                .await
            }
            "reference/validate" => {
                dispatch_handler(request.params, |r| {
                    handlers::reference::handle_validate_references(engine, r)
                })
                .await
            }
            "financial/score" => {
                dispatch_handler(request.params, |r| {
                    handlers::financial::handle_score_financial(engine, r)
                })
                .await
            }
            "signature/verify" => {
                dispatch_handler(request.params, handlers::signature::handle_verify_signature).await
            }
            "node/health" => {
                let start_time = self.start_time;
                dispatch_handler(request.params, |r| {
                    handlers::node::handle_get_health(r, engine, start_time)
                })
                .await
            }
            _ => Err(TrustError::Validation(format!("Unknown method: {}", request.method))),
        };

        let response = match result {
            Ok(value) => JsonRpcResponse::ok(value),
            Err(err) => JsonRpcResponse::from_error(&err),
        };
        middleware::log_outcome(&request.method, response.code, started.elapsed());
        response
    }
}

/// Deserialize params into a request type, call the handler, and serialize
/// the result. Missing params deserialize from an empty object.
async fn dispatch_handler<Req, Resp, F, Fut>(
    params: serde_json::Value,
    handler: F,
) -> Result<serde_json::Value, TrustError>
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: std::future::Future<Output = Result<Resp, TrustError>>,
{
    let params = if params.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        params
    };
    let request: Req =
        serde_json::from_value(params)
            .map_err(|e| TrustError::Validation(format!("Invalid params: {}", e)))?;
    let response = handler(request).await?;
    serde_json::to_value(response)
        .map_err(|e| TrustError::Computation(format!("Failed to serialize response: {}", e)))
}

// ---------------------------------------------------------------------------
// Tonic Service Wiring
// ---------------------------------------------------------------------------
// One service, raw JSON bodies, no proto codegen.

#[derive(Clone)]
pub struct TrustJsonRpcServer {
    inner: TrustServiceImpl,
}

impl std::fmt::Debug for TrustJsonRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustJsonRpcServer").finish()
    }
}

impl TrustJsonRpcServer {
    fn new(inner: TrustServiceImpl) -> Self {
        Self { inner }
    }
}

impl tonic::server::NamedService for TrustJsonRpcServer {
    const NAME: &'static str = "trustnet.rpc.TrustService";
}

impl<B> tower_service::Service<http::Request<B>> for TrustJsonRpcServer
where
    B: HttpBody + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
    B::Data: Send,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            let body_bytes = match collect_body(req.into_body()).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!("Failed to read request body: {}", e);
                    let err = TrustError::Io(format!("Failed to read request body: {}", e));
                    return Ok(build_response(&JsonRpcResponse::from_error(&err)));
                }
            };

            let rpc_request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
                Ok(r) => r,
                Err(e) => {
                    let err = TrustError::Validation(format!("Invalid JSON-RPC request: {}", e));
                    return Ok(build_response(&JsonRpcResponse::from_error(&err)));
                }
            };

            let rpc_response = inner.dispatch(rpc_request).await;
            Ok(build_response(&rpc_response))
        })
    }
}

async fn collect_body<B>(body: B) -> Result<Vec<u8>, String>
where
    B: HttpBody + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    B::Data: Send,
{
    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    loop {
        match std::future::poll_fn(|cx| HttpBody::poll_frame(body.as_mut(), cx)).await {
            Some(Ok(frame)) => {
                if let Ok(data) = frame.into_data() {
                    use bytes::Buf;
                    collected.extend_from_slice(data.chunk());
                }
            }
            Some(Err(e)) => return Err(e.into().to_string()),
            None => break,
        }
    }

    Ok(collected)
}

/// JSON response whose HTTP status mirrors the envelope's `code`.
fn build_response(rpc_response: &JsonRpcResponse) -> http::Response<tonic::body::BoxBody> {
    let json = serde_json::to_vec(rpc_response).unwrap_or_default();
    let body = tonic::body::BoxBody::new(
        http_body_util::Full::new(bytes::Bytes::from(json))
            .map_err(|e| Status::internal(format!("body error: {}", e))),
    );

    let mut response = http::Response::new(body);
    *response.status_mut() =
        http::StatusCode::from_u16(rpc_response.code)
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_status_mirrors_code() {
        let err = TrustError::Authentication("Invalid signature".into());
        let response = build_response(&JsonRpcResponse::from_error(&err));
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);

        let response = build_response(&JsonRpcResponse::ok(serde_json::json!({"valid": true})));
        assert_eq!(response.status(), http::StatusCode::OK);
    }

    #[test]
    fn request_params_default_to_null() {
        let request: JsonRpcRequest = serde_json::from_str(r#"{"method":"node/health"}"#).unwrap();
        assert!(request.params.is_null());
    }
}
