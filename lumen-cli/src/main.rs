//! Lumen CLI
//!
//! Command-line interface for submitting generations to the remote media API
//! and following the resulting jobs.

mod commands;
mod config;
mod output;
mod params;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use lumen_client::config::DEFAULT_API_URL;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Generative media jobs from the command line", long_about = None)]
struct Cli {
    /// Remote API URL
    #[arg(long, env = "LUMEN_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// API key sent as a bearer token
    #[arg(long, env = "LUMEN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "LUMEN_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Default completion webhook for submissions
    #[arg(long, env = "LUMEN_CALLBACK_URL")]
    callback_url: Option<String>,

    /// Print results as a JSON success/error envelope
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen_cli=info,lumen_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        api_key: cli.api_key,
        request_timeout: cli.request_timeout,
        callback_url: cli.callback_url,
        json: cli.json,
    };

    handle_command(cli.command, &config).await
}
