use std::sync::Arc;

use clap::{Parser, ValueEnum};
use quicksight_mcp::config::{Config, ConfigOverrides};
use quicksight_mcp::error::Result;
use quicksight_mcp::{AwsCliClient, QuickSightMcpServer, QuickSightService};
use tracing_subscriber::EnvFilter;

/// MCP server for AWS QuickSight over stdio
#[derive(Parser, Debug)]
#[command(name = "quicksight-mcp", version, about, long_about = None)]
struct Args {
    /// AWS account that owns the QuickSight resources (overrides AWS_ACCOUNT_ID)
    #[arg(long)]
    aws_account_id: Option<String>,

    /// AWS region (overrides AWS_REGION, default us-east-1)
    #[arg(long)]
    aws_region: Option<String>,

    /// AWS CLI profile (overrides AWS_PROFILE)
    #[arg(long)]
    aws_profile: Option<String>,

    #[arg(long)]
    aws_access_key_id: Option<String>,

    #[arg(long)]
    aws_secret_access_key: Option<String>,

    #[arg(long)]
    aws_session_token: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    debug: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            aws_account_id: self.aws_account_id.clone(),
            aws_region: self.aws_region.clone(),
            aws_profile: self.aws_profile.clone(),
            aws_access_key_id: self.aws_access_key_id.clone(),
            aws_secret_access_key: self.aws_secret_access_key.clone(),
            aws_session_token: self.aws_session_token.clone(),
        }
    }
}

/// Logs go to stderr; stdout carries the protocol.
fn setup_logging(debug: bool, format: LogFormat) {
    let default_directive = if debug {
        "quicksight_mcp=debug"
    } else {
        "quicksight_mcp=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Loaded before logging so RUST_LOG may come from .env
    let config = Config::load(args.overrides());
    setup_logging(args.debug, args.log_format);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        account = %config.aws_account_id,
        region = %config.aws_region,
        profile = config.aws_profile.as_deref().unwrap_or("default"),
        "Starting QuickSight MCP server..."
    );

    let client = Arc::new(AwsCliClient::new(&config));
    let service = QuickSightService::new(client, config.aws_account_id.clone());
    let server = QuickSightMcpServer::new(service);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
