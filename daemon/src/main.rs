//! hustings daemon — entry point for running an election coordinator.

use clap::Parser;
use std::path::PathBuf;

use hustings_node::{init_logging, ElectionNode, LogFormat, NodeConfig};

#[derive(Parser)]
#[command(name = "hustings-daemon", about = "Real-time election coordinator")]
struct Cli {
    /// Port for the session hub.
    #[arg(long, env = "HUSTINGS_PORT")]
    port: Option<u16>,

    /// Path to a TOML configuration file. File settings are the base; CLI
    /// flags and env vars override them.
    #[arg(long, env = "HUSTINGS_CONFIG")]
    config: Option<PathBuf>,

    /// Disable the privileged audit view (raw voter identifiers).
    #[arg(long, env = "HUSTINGS_DISABLE_AUDIT")]
    disable_audit: bool,

    /// Enable the Prometheus metrics endpoint.
    #[arg(long, env = "HUSTINGS_ENABLE_METRICS")]
    metrics: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "HUSTINGS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "HUSTINGS_LOG_FORMAT")]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)?,
        None => NodeConfig::default(),
    };

    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.disable_audit {
        config.expose_audit = false;
    }
    if cli.metrics {
        config.enable_metrics = true;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logging(LogFormat::from_config(&config.log_format), &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let node = ElectionNode::new(config)?;
    node.run().await?;

    tracing::info!("hustings daemon exited cleanly");
    Ok(())
}
