//! JSON-RPC 2.0 over HTTP.
//!
//! # Protocol
//!
//! Every call is one HTTP POST with `Content-Type: application/json`:
//!
//! ```text
//! --> {"jsonrpc":"2.0","method":"Echo.Echo","params":{"in":"TEST"},"id":0}
//! <-- {"jsonrpc":"2.0","id":0,"result":"TEST"}
//! ```
//!
//! Failures come back either as a non-2xx HTTP status or as an `error`
//! object in place of `result`:
//!
//! ```text
//! <-- {"jsonrpc":"2.0","id":0,"error":{"code":-32601,"message":"Method not found"}}
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use smshinet_cli::rpc::RpcClient;
//! use serde_json::json;
//!
//! let client = RpcClient::new("http://localhost:3059/jsonrpc".parse()?);
//! let result = client.call("Echo.Echo", json!({"in": "TEST"})).await?;
//! ```

mod client;
mod envelope;

pub use client::{CallError, ErrorClass, RpcClient, DEFAULT_TIMEOUT_SECS};
pub use envelope::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
