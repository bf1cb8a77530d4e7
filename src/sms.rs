//! Typed access to the three smshinetd methods.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::models::{EchoArgs, MessageId, TextMsgArgs, TextStatus};
use crate::rpc::{CallError, RpcClient};

pub const ECHO_METHOD: &str = "Echo.Echo";
pub const SEND_TEXT_METHOD: &str = "SMSHiNet.SendTextSMS";
pub const CHECK_STATUS_METHOD: &str = "SMSHiNet.CheckTextStatus";

/// Client for the smshinetd gateway.
///
/// Results are returned as raw JSON values: the message identifier from
/// [`send_text_sms`](Self::send_text_sms) is an opaque token meant to be
/// handed back to [`check_text_status`](Self::check_text_status) as-is.
pub struct SmsClient {
    rpc: RpcClient,
}

impl SmsClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Liveness check. The server is expected to return `input` unchanged.
    pub async fn echo(&self, input: &str) -> Result<Value, CallError> {
        let args = EchoArgs {
            input: input.to_string(),
        };
        let result = self.rpc.call(ECHO_METHOD, to_params(&args)?).await?;

        if result.as_str() != Some(input) {
            warn!(expected = input, received = %result, "Echo returned unexpected value");
        }
        Ok(result)
    }

    /// Queue a text message and return the gateway's message identifier.
    pub async fn send_text_sms(&self, recipient: &str, message: &str) -> Result<Value, CallError> {
        let args = TextMsgArgs {
            recipient: recipient.to_string(),
            message: message.to_string(),
        };
        let result = self.rpc.call(SEND_TEXT_METHOD, to_params(&args)?).await?;

        if let Some(id) = MessageId::from_result(&result) {
            info!(message_id = %id.message_id, recipient, "Text message accepted");
        }
        Ok(result)
    }

    /// Query delivery status. `msgid` is sent verbatim as the params.
    pub async fn check_text_status(&self, msgid: Value) -> Result<Value, CallError> {
        let result = self.rpc.call(CHECK_STATUS_METHOD, msgid).await?;

        if let Some(status) = TextStatus::from_result(&result) {
            info!(success = status.success, "Text message {}", status.describe());
        }
        Ok(result)
    }
}

fn to_params<T: Serialize>(args: &T) -> Result<Value, CallError> {
    serde_json::to_value(args)
        .map_err(|e| CallError::Protocol(format!("Failed to encode params: {}", e)))
}
