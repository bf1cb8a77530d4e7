//! JSON-RPC 2.0 client over HTTP POST.
//!
//! This module provides `RpcClient`, an async client that posts JSON-RPC 2.0
//! requests to a single HTTP endpoint and maps every failure onto
//! [`CallError`] with automatic timeout handling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

use crate::rpc::envelope::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors returned by [`RpcClient::call`].
///
/// Every variant belongs to one of three classes (see [`ErrorClass`]) so
/// callers can tell "could not reach the server" apart from "the server
/// rejected the call".
#[derive(Debug, Error)]
pub enum CallError {
    /// The HTTP exchange itself failed (DNS, connect, reset, body read).
    #[error("Connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// Request timed out waiting for response.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Server answered with a non-2xx HTTP status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, not parsed
        body: String,
    },

    /// Response is not a valid JSON-RPC 2.0 envelope.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Server returned a JSON-RPC error response.
    #[error("Server error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message
        message: String,
        /// Optional additional data
        data: Option<Value>,
    },
}

/// Coarse classification of a [`CallError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Network or HTTP-layer failure.
    Transport,
    /// Malformed response envelope.
    Protocol,
    /// Application error reported by the server.
    Rpc,
}

impl CallError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CallError::Connection(_) | CallError::Timeout(_) | CallError::HttpStatus { .. } => {
                ErrorClass::Transport
            }
            CallError::Protocol(_) => ErrorClass::Protocol,
            CallError::Rpc { .. } => ErrorClass::Rpc,
        }
    }
}

impl From<JsonRpcError> for CallError {
    fn from(err: JsonRpcError) -> Self {
        CallError::Rpc {
            code: err.code,
            message: err.message,
            data: err.data,
        }
    }
}

/// JSON-RPC 2.0 client bound to one HTTP endpoint.
///
/// Each client owns its request id counter, starting at 0, so independent
/// clients produce independent id sequences. The counter is atomic and the
/// client can be shared by reference, but calls are meant to be issued one
/// after another.
///
/// # Example
///
/// ```ignore
/// use smshinet_cli::rpc::RpcClient;
/// use serde_json::json;
///
/// let client = RpcClient::new("http://localhost:3059/jsonrpc".parse()?);
/// let pong = client.call("Echo.Echo", json!({"in": "TEST"})).await?;
/// ```
pub struct RpcClient {
    /// Shared HTTP connection pool.
    http: reqwest::Client,
    /// Target JSON-RPC endpoint.
    endpoint: Url,
    /// Monotonically increasing request ID counter.
    request_id: AtomicU64,
    /// Request timeout duration.
    timeout: Duration,
}

impl RpcClient {
    /// Create a client for `endpoint` with the default 30 second timeout.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            request_id: AtomicU64::new(0),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builder-style variant of [`set_timeout`](Self::set_timeout).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request timeout duration.
    ///
    /// Default is 30 seconds. The timeout covers the whole exchange,
    /// including reading the response body.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send a JSON-RPC 2.0 request and wait for the response.
    ///
    /// This method:
    /// 1. Builds a JSON-RPC 2.0 request with auto-incremented ID
    /// 2. POSTs it as `application/json`
    /// 3. Waits for response (with timeout)
    /// 4. Validates the envelope and extracts result or error
    ///
    /// # Arguments
    ///
    /// * `method` - The RPC method name (e.g., "Echo.Echo")
    /// * `params` - Method parameters as JSON value, sent verbatim
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached (`CallError::Connection`)
    /// - Request times out (`CallError::Timeout`)
    /// - HTTP status is not 2xx (`CallError::HttpStatus`)
    /// - Response is not a JSON-RPC 2.0 envelope (`CallError::Protocol`)
    /// - Server returns error (`CallError::Rpc`)
    ///
    /// An empty `method` is rejected as `CallError::Protocol` before an id
    /// is assigned.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, CallError> {
        if method.is_empty() {
            return Err(CallError::Protocol("Method name must not be empty".to_string()));
        }

        let id = self.next_id();
        let request = JsonRpcRequest::new(method, params, id);

        debug!(id, method, endpoint = %self.endpoint, "Sending JSON-RPC request");

        // Apply timeout to the entire send/receive operation
        let result = timeout(self.timeout, self.send_receive(&request)).await;

        match result {
            Ok(Ok(response)) => self.process_response(id, response),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CallError::Timeout(self.timeout)),
        }
    }

    /// Generate the next request ID.
    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Post a request and parse the response envelope (internal, no timeout).
    async fn send_receive(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, CallError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| CallError::Protocol(format!("Failed to serialize request: {}", e)))?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(CallError::Connection)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(error = %e, id = request.id, "Failed to read HTTP error body");
                String::new()
            });
            warn!(status = status.as_u16(), id = request.id, "JSON-RPC endpoint returned HTTP error");
            return Err(CallError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(CallError::Connection)?;

        serde_json::from_slice(&bytes)
            .map_err(|e| CallError::Protocol(format!("Failed to parse response: {}", e)))
    }

    /// Process a JSON-RPC response, extracting result or error.
    fn process_response(&self, id: u64, response: JsonRpcResponse) -> Result<Value, CallError> {
        if response.jsonrpc != JSONRPC_VERSION {
            return Err(CallError::Protocol(format!(
                "Unsupported JSON-RPC version: {}",
                response.jsonrpc
            )));
        }

        if !response.matches_id(id) {
            warn!(expected = id, received = ?response.id, "JSON-RPC response id mismatch");
        }

        // Check for JSON-RPC error
        if let Some(err) = response.error {
            return Err(err.into());
        }

        // Extract result
        response
            .result
            .ok_or_else(|| CallError::Protocol("Response missing both result and error".to_string()))
    }
}
