//! smshinet - command line tool for smshinetd.
//!
//! Checks the service with `Echo.Echo`, sends one text message, waits, and
//! prints the delivery status reported by the gateway.

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use smshinet_cli::demo::{self, DemoOptions, DEFAULT_MESSAGE};
use smshinet_cli::rpc::{RpcClient, DEFAULT_TIMEOUT_SECS};
use smshinet_cli::sms::SmsClient;

const DEFAULT_URI: &str = "http://localhost:3059/jsonrpc";

#[derive(Parser, Debug)]
#[command(version, about = "Command line tool for smshinetd", long_about = None)]
struct Cli {
    /// Mobile number of recipient
    recipient: String,

    /// Message to send
    #[arg(default_value = DEFAULT_MESSAGE)]
    message: String,

    /// URI of smshinetd service
    #[arg(short, long, env = "SMSHINET_URI", default_value = DEFAULT_URI)]
    uri: Url,

    /// Only check the service with an echo call
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Seconds to wait before checking delivery status
    #[arg(short, long, default_value_t = 30)]
    wait: u64,

    /// Per-request timeout in seconds
    #[arg(
        short,
        long,
        env = "SMSHINET_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
}

impl Cli {
    fn demo_options(&self) -> DemoOptions {
        DemoOptions {
            recipient: self.recipient.clone(),
            message: self.message.clone(),
            dry_run: self.dry_run,
            status_delay: Duration::from_secs(self.wait),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, results to stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "smshinet_cli=info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    tracing::debug!("smshinet v{} -> {}", env!("CARGO_PKG_VERSION"), cli.uri);

    let rpc = RpcClient::new(cli.uri.clone()).with_timeout(Duration::from_secs(cli.timeout));
    let client = SmsClient::new(rpc);

    let mut stdout = io::stdout().lock();
    demo::run(&client, &cli.demo_options(), &mut stdout).await
}
