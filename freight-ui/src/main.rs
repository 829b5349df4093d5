use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use freight_core::ResponsePolicy;
use tokio::io::BufReader;
use tracing::info;

use freight_ui::{Overrides, Settings, app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Terminal dashboard for the freight booking service.
///
/// Reads commands from stdin (type `help`), sends estimate, booking and
/// tracking requests to the service, and redraws the dashboard after every
/// change.
#[derive(Debug, Parser)]
#[command(name = "freight-dashboard", version, about)]
struct Cli {
    /// TOML settings file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Client backend to use.
    #[arg(long)]
    backend: Option<String>,

    /// Base URL of the booking service (default `http://localhost:4000`).
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds; 0 disables it.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// How out-of-order responses are applied: `last-arrival` or
    /// `latest-request`.
    #[arg(long, value_parser = parse_policy)]
    policy: Option<ResponsePolicy>,

    /// Log level or `EnvFilter` directive. `RUST_LOG` wins when set.
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_policy(s: &str) -> Result<ResponsePolicy, String> {
    ResponsePolicy::parse(s)
        .ok_or_else(|| format!("unknown policy '{s}'; expected last-arrival or latest-request"))
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            response_policy: self.policy,
            log_level: self.log_level.clone(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.apply(cli.overrides());

    logging::init_logging(&settings.logging.level);
    if let Some(path) = &settings.logging.file {
        logging::enable_file_logging(path).context("cannot enable file logging")?;
    }

    info!(
        backend = %settings.api.backend,
        base_url = %settings.api.base_url,
        policy = %settings.dashboard.response_policy,
        "starting dashboard"
    );

    let dashboard = Arc::new(app::connect(&settings).await?);
    let input = BufReader::new(tokio::io::stdin());
    app::run(dashboard, input, &mut io::stdout()).await
}
