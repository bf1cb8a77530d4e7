//! smshinet command line client library
//!
//! This library provides the components behind the `smshinet` binary:
//!
//! - `rpc` - JSON-RPC 2.0 envelope types and the HTTP client
//! - `models` - Argument and reply shapes of the smshinetd methods
//! - `sms` - Typed client for `Echo.Echo`, `SMSHiNet.SendTextSMS` and
//!   `SMSHiNet.CheckTextStatus`
//! - `demo` - The echo / send / check script run by the binary
//!
//! ```ignore
//! use smshinet_cli::rpc::RpcClient;
//! use smshinet_cli::sms::SmsClient;
//!
//! let client = SmsClient::new(RpcClient::new("http://localhost:3059/jsonrpc".parse()?));
//! let msgid = client.send_text_sms("0912345678", "hello").await?;
//! let status = client.check_text_status(msgid).await?;
//! ```

pub mod demo;
pub mod models;
pub mod rpc;
pub mod sms;
