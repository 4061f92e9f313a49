//! urlpoll main entry point
//!
//! This is the command-line interface for the urlpoll liveness monitor.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use urlpoll::config::{resolve_config, ConfigOverrides};
use urlpoll::monitor::run_monitor;

/// urlpoll: periodic HTTP HEAD liveness checks
///
/// Probes every URL in the list on a fixed cadence, backs off linearly on
/// consecutive failures, and logs the status of every URL at a fixed interval.
#[derive(Parser, Debug)]
#[command(name = "urlpoll")]
#[command(version)]
#[command(about = "Periodic HTTP HEAD liveness checks", long_about = None)]
struct Cli {
    /// File containing the URLs to poll, one per line
    #[arg(long, value_name = "FILE")]
    urls_filepath: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent probers [default: 2]
    #[arg(long)]
    num_pollers: Option<usize>,

    /// Base time between probes of the same URL, in milliseconds [default: 60000]
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Time between status snapshots, in milliseconds [default: 10000]
    #[arg(long)]
    status_interval_ms: Option<u64>,

    /// Extra delay per consecutive failure, in milliseconds [default: 10000]
    #[arg(long)]
    err_timeout_ms: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            urls_filepath: self.urls_filepath.clone(),
            num_pollers: self.num_pollers,
            poll_interval_ms: self.poll_interval_ms,
            status_interval_ms: self.status_interval_ms,
            err_timeout_ms: self.err_timeout_ms,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(cli.config.as_deref(), &cli.overrides()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("invalid configuration");
        }
    };

    match run_monitor(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Monitor stopped: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("urlpoll=info,warn"),
            1 => EnvFilter::new("urlpoll=debug,info"),
            2 => EnvFilter::new("urlpoll=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
