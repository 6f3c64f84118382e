//! IAM Docs - Entry point
//!
//! Serves the Swagger UI reference for the IAM APIs.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use iam_docs_config::{ConfigLoader, DocsServiceConfig, LoggingConfig, DEFAULT_ENV_PREFIX};
use iam_docs_server::DocsServer;
use iam_docs_telemetry::{init_logging, LogConfig, LogFormat};

/// Configuration file picked up from the working directory when
/// `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "iam-docs.toml";

/// IAM API reference viewer.
#[derive(Debug, Parser)]
#[command(name = "iam-docs", version, about)]
struct Args {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "IAM_DOCS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `server.http_addr`
    #[arg(long)]
    http_addr: Option<String>,

    /// Log filter directives, overrides `logging.level`
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format, overrides `logging.format`
    #[arg(long, value_enum)]
    log_format: Option<CliLogFormat>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Json,
    Pretty,
}

impl From<CliLogFormat> for iam_docs_config::LogFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Json => Self::Json,
            CliLogFormat::Pretty => Self::Pretty,
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<DocsServiceConfig> {
    let loader = ConfigLoader::new().with_dotenv()?;

    let loader = match &args.config {
        Some(path) => loader
            .with_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => loader.with_optional_file(DEFAULT_CONFIG_FILE)?,
    };

    let mut config = loader.with_env_prefix(DEFAULT_ENV_PREFIX).load_unvalidated();

    if let Some(addr) = &args.http_addr {
        config.server.http_addr.clone_from(addr);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if let Some(format) = args.log_format {
        config.logging.format = format.into();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn log_config(logging: &LoggingConfig) -> LogConfig {
    let base = match logging.format {
        iam_docs_config::LogFormat::Json => LogConfig::production(),
        iam_docs_config::LogFormat::Pretty => LogConfig::development(),
    };

    LogConfig {
        enabled: logging.enabled,
        format: match logging.format {
            iam_docs_config::LogFormat::Json => LogFormat::Json,
            iam_docs_config::LogFormat::Pretty => LogFormat::Pretty,
        },
        include_location: logging.include_location,
        ansi: logging.ansi_enabled,
        ..base
    }
    .level(&logging.level)
    .service_name(iam_docs_server::SERVICE_NAME)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging(&log_config(&config.logging)).context("failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        http_addr = %config.server.http_addr,
        default_url = %config.viewer.default_url,
        "Starting IAM docs server"
    );

    let server = DocsServer::from_service_config(&config)?;
    server.run().await.context("server error")?;

    Ok(())
}
