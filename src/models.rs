//! Data models for the smshinetd JSON-RPC service.
//!
//! These Rust structs match the argument and reply types registered by the
//! smshinetd server. Field names follow the server's JSON exactly, which
//! mixes lowercase keys (request arguments) and Go-style capitalized keys
//! (replies).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments of `Echo.Echo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoArgs {
    #[serde(rename = "in")]
    pub input: String,
}

/// Arguments of `SMSHiNet.SendTextSMS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMsgArgs {
    /// Mobile number of the recipient, passed through untouched.
    pub recipient: String,
    pub message: String,
}

/// Reply of `SMSHiNet.SendTextSMS`, also the argument of
/// `SMSHiNet.CheckTextStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageId {
    #[serde(rename = "MessageID")]
    pub message_id: String,
}

impl MessageId {
    /// Decode a send result, if it has the server's usual shape.
    ///
    /// Returns `None` for any other shape; the raw result remains the
    /// authoritative token for the status call.
    pub fn from_result(result: &Value) -> Option<Self> {
        serde_json::from_value(result.clone()).ok()
    }
}

/// Reply of `SMSHiNet.CheckTextStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStatus {
    #[serde(rename = "Success")]
    pub success: bool,
    /// Gateway error text, empty on success.
    #[serde(rename = "Error", default)]
    pub error: String,
}

impl TextStatus {
    pub fn from_result(result: &Value) -> Option<Self> {
        serde_json::from_value(result.clone()).ok()
    }

    /// Get a short display string.
    pub fn describe(&self) -> String {
        if self.success {
            "delivered".to_string()
        } else if self.error.is_empty() {
            "not delivered".to_string()
        } else {
            format!("not delivered: {}", self.error)
        }
    }
}
