//! Echo, send, wait, check: the command line script.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::sms::SmsClient;

/// Delay between sending a message and checking its status.
pub const DEFAULT_STATUS_DELAY: Duration = Duration::from_secs(30);

/// Default message body when none is given.
pub const DEFAULT_MESSAGE: &str = "jsonrpc test";

/// Payload sent to `Echo.Echo`.
const ECHO_PAYLOAD: &str = "TEST";

#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub recipient: String,
    pub message: String,
    /// Stop after the echo call.
    pub dry_run: bool,
    pub status_delay: Duration,
}

impl DemoOptions {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: DEFAULT_MESSAGE.to_string(),
            dry_run: false,
            status_delay: DEFAULT_STATUS_DELAY,
        }
    }
}

/// Run the script against `client`, printing each result to `out`.
///
/// The status check happens once after a single flat wait of
/// `options.status_delay`; whatever the gateway reports at that point is
/// printed, final or not.
///
/// # Errors
///
/// Stops at the first failed call and returns it with context naming the
/// step. Write failures on `out` are returned as well.
pub async fn run<W: Write>(client: &SmsClient, options: &DemoOptions, out: &mut W) -> Result<()> {
    let echoed = client
        .echo(ECHO_PAYLOAD)
        .await
        .context("Echo check failed")?;
    writeln!(out, "{}", render(&echoed))?;

    if options.dry_run {
        tracing::info!("Dry run, not sending message");
        return Ok(());
    }

    let msgid = client
        .send_text_sms(&options.recipient, &options.message)
        .await
        .with_context(|| format!("Sending text message to {} failed", options.recipient))?;
    writeln!(
        out,
        "{}, wait for {} secs to check",
        render(&msgid),
        options.status_delay.as_secs()
    )?;
    out.flush()?;

    tokio::time::sleep(options.status_delay).await;

    let status = client
        .check_text_status(msgid)
        .await
        .context("Checking text message status failed")?;
    writeln!(out, "{}", render(&status))?;

    Ok(())
}

fn render(value: &Value) -> String {
    value.to_string()
}
