//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod generate;
mod job;
mod library;
mod models;

pub use generate::{ImageArgs, TrainStyleArgs, UpscaleArgs, VideoArgs};
pub use job::JobCommands;
pub use library::{AssetCommands, StyleCommands};

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate an image
    Image(ImageArgs),
    /// Generate a video
    Video(VideoArgs),
    /// Upscale or enhance an image
    Upscale(UpscaleArgs),
    /// Train a style (LoRA) from reference images
    TrainStyle(TrainStyleArgs),
    /// Job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Stored asset management
    Asset {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Trained style management
    Style {
        #[command(subcommand)]
        command: StyleCommands,
    },
    /// Show the model routing tables
    Models {
        /// Only show one family (image, video, enhance, style_training)
        #[arg(long)]
        family: Option<String>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module. Remote commands get
/// a gateway built from the configuration and passed down explicitly.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Image(args) => generate::image(&config.gateway()?, args, config).await,
        Commands::Video(args) => generate::video(&config.gateway()?, args, config).await,
        Commands::Upscale(args) => generate::upscale(&config.gateway()?, args, config).await,
        Commands::TrainStyle(args) => {
            generate::train_style(&config.gateway()?, args, config).await
        }
        Commands::Job { command } => {
            job::handle_job_command(&config.gateway()?, command, config).await
        }
        Commands::Asset { command } => {
            library::handle_asset_command(&config.gateway()?, command, config).await
        }
        Commands::Style { command } => {
            library::handle_style_command(&config.gateway()?, command, config).await
        }
        Commands::Models { family } => models::show_models(family.as_deref(), config.json),
    }
}
