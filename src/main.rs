// src/main.rs

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, FmtSubscriber};

use price_verifier::api::CatalogClient;
use price_verifier::cli::{self, Cli};
use price_verifier::config::{Config, APP_NAME};
use price_verifier::tui::{self, TuiLogCollectorLayer, UILogEntry};

const LOG_FILE_NAME: &str = "price-verifier.log";

// RUST_LOG=price_verifier=debug,reqwest=warn wins over everything else.
fn env_filter(cli_args: &Cli, fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = cli_args.log_level.map(|l| l.as_filter()).unwrap_or(fallback);
        EnvFilter::new(level)
    })
}

fn load_config(cli_args: &Cli) -> Result<Config> {
    // Config loading happens before the real subscriber exists, so its
    // messages go to stderr through a temporary one.
    let bootstrap = FmtSubscriber::builder()
        .with_env_filter(env_filter(cli_args, "warn"))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::with_default(bootstrap, || {
        let mut config = match Config::load(cli_args.config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) if cli_args.config.is_none() => {
                warn!("Proceeding with default configuration due to error: {:#}", e);
                let mut cfg = Config::default();
                cfg.apply_env();
                cfg
            }
            Err(e) => return Err(e),
        };
        if let Some(url) = &cli_args.api_url {
            config.set_api_url(url);
        }
        Ok(config)
    })
}

fn init_cli_logging(cli_args: &Cli, config: &Config) -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(env_filter(cli_args, &config.logging.level))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

/// Logs go to a file and to the in-app log panel; stderr would corrupt the
/// terminal UI.
fn init_tui_logging(
    cli_args: &Cli,
    config: &Config,
) -> Result<(mpsc::UnboundedReceiver<UILogEntry>, Option<WorkerGuard>)> {
    let (log_tx, log_rx) = mpsc::unbounded_channel::<UILogEntry>();

    let mut file_error = None;
    let file_writer = match config.logging.log_dir_path().and_then(|dir| {
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }) {
        Ok(dir) => {
            let appender = if config.logging.rotate_daily {
                rolling::daily(&dir, LOG_FILE_NAME)
            } else {
                rolling::never(&dir, LOG_FILE_NAME)
            };
            Some(tracing_appender::non_blocking(appender))
        }
        Err(e) => {
            file_error = Some(e);
            None
        }
    };
    let (file_layer, guard) = match file_writer {
        Some((writer, guard)) => (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(cli_args, &config.logging.level))
        .with(file_layer)
        .with(TuiLogCollectorLayer::new(log_tx))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    if let Some(e) = file_error {
        warn!("File logging disabled: {:#}", e);
    }
    Ok((log_rx, guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli_args = Cli::parse();
    let config = load_config(&cli_args)?;

    match cli_args.command.take() {
        Some(command) => {
            init_cli_logging(&cli_args, &config)?;
            debug!("Loaded app config: {:?}", config);
            cli::handle_command(command, &config).await?;
        }
        None => {
            // Dropping the guard flushes the file writer, so it lives until exit.
            let (log_receiver, _log_guard) = init_tui_logging(&cli_args, &config)?;
            info!("Starting {} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
            debug!("Loaded app config: {:?}", config);
            let client = Arc::new(CatalogClient::new(&config.api)?);
            tui::run_tui(Arc::new(config), client, log_receiver).await?;
        }
    }

    Ok(())
}
