mod cancel;
mod config;
mod credentials;
mod error;
mod model;
mod service;
mod session;
mod signal;
mod tail;
mod validate;
mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Settings;
use credentials::ServerRegistry;
use service::transport::ReqwestTransport;
use session::Session;

/// Print logs from a remote JFrog product
#[derive(Debug, Parser)]
#[command(name = "live-logs", version)]
struct Cli {
    /// Servers file (defaults to $LIVE_LOGS_SERVERS_FILE or the user config dir)
    #[arg(long, global = true)]
    servers_file: Option<PathBuf>,

    /// Log request diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Display the list of nodes and log file names
    #[command(visible_alias = "c")]
    Config {
        /// Product id: rt (Artifactory), xr (Xray), mc (Mission Control),
        /// ds (Distribution) or pl (Pipelines)
        product_id: String,
        /// Server id from the servers file
        server_id: String,
    },

    /// Fetch the log of a desired service
    #[command(visible_alias = "l")]
    Logs {
        /// Product id: rt, xr, mc, ds or pl
        product_id: String,
        /// Server id from the servers file
        server_id: String,
        /// Selected node id
        node_id: String,
        /// Selected log name
        log_name: String,
        /// Keep polling for new content, like `tail -f`
        #[arg(short = 'f', long = "follow")]
        follow: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::from_env();
    if let Some(path) = cli.servers_file {
        settings.servers_file = path;
    }

    let registry = ServerRegistry::load(&settings.servers_file)?;
    let transport = ReqwestTransport::new().context("failed to create HTTP client")?;

    let (cancel_handle, cancel_signal) = cancel::channel();
    let mut session = Session::new(
        settings,
        Arc::new(registry),
        Arc::new(transport),
        cancel_signal,
    );
    let mut stdout = tokio::io::stdout();

    match cli.command {
        Command::Config {
            product_id,
            server_id,
        } => {
            session
                .config_non_interactive(&product_id, &server_id, &mut stdout)
                .await?;
        }
        Command::Logs {
            product_id,
            server_id,
            node_id,
            log_name,
            follow,
        } => {
            signal::listen_for_termination(cancel_handle);
            session
                .log_non_interactive(
                    &product_id,
                    &server_id,
                    &node_id,
                    &log_name,
                    follow,
                    &mut stdout,
                )
                .await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
