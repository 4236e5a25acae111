//! Asset and style command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use lumen_client::HttpGateway;
use lumen_core::domain::asset::Asset;
use lumen_core::domain::style::Style;
use lumen_core::dto::listing::{AssetFilter, Page, Pagination};

use crate::config::Config;
use crate::output::{emit, print_deleted};

/// Asset subcommands
#[derive(Subcommand)]
pub enum AssetCommands {
    /// List stored assets
    List {
        /// Type filter (image, video, ..., all)
        #[arg(long = "type", default_value = "all")]
        kind: String,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },
    /// Get asset details
    Get { id: String },
    /// Delete an asset
    Delete { id: String },
}

/// Style subcommands
#[derive(Subcommand)]
pub enum StyleCommands {
    /// List trained styles
    List {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },
    /// Get style details
    Get { id: String },
    /// Delete a style
    Delete { id: String },
}

pub async fn handle_asset_command(
    gateway: &HttpGateway,
    command: AssetCommands,
    config: &Config,
) -> Result<()> {
    match command {
        AssetCommands::List {
            kind,
            limit,
            offset,
        } => {
            let filter = AssetFilter {
                kind: Some(kind),
                page: Pagination::new(limit, offset),
            };
            let result = gateway.list_assets(&filter).await;
            emit(config.json, result, print_asset_page)
        }
        AssetCommands::Get { id } => {
            let result = gateway.get_asset(&id).await;
            emit(config.json, result, print_asset)
        }
        AssetCommands::Delete { id } => {
            let result = gateway.delete_asset(&id).await;
            emit(config.json, result, |deleted| print_deleted("Asset", &id, *deleted))
        }
    }
}

pub async fn handle_style_command(
    gateway: &HttpGateway,
    command: StyleCommands,
    config: &Config,
) -> Result<()> {
    match command {
        StyleCommands::List { limit, offset } => {
            let result = gateway.list_styles(&Pagination::new(limit, offset)).await;
            emit(config.json, result, print_style_page)
        }
        StyleCommands::Get { id } => {
            let result = gateway.get_style(&id).await;
            emit(config.json, result, print_style)
        }
        StyleCommands::Delete { id } => {
            let result = gateway.delete_style(&id).await;
            emit(config.json, result, |deleted| print_deleted("Style", &id, *deleted))
        }
    }
}

fn print_asset_page(page: &Page<Asset>) {
    if page.items.is_empty() {
        println!("{}", "No assets found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Showing {} of {} asset(s):", page.items.len(), page.total).bold()
    );
    println!();
    for asset in &page.items {
        print_asset(asset);
        println!();
    }
}

fn print_asset(asset: &Asset) {
    println!("  {} Asset {}", "▸".cyan(), asset.id.dimmed());
    println!("    Type:    {}", asset.kind);
    println!("    URL:     {}", asset.url.green());
    if let Some(filename) = &asset.filename {
        println!("    File:    {}", filename);
    }
    if let Some(size) = asset.size_bytes {
        println!("    Size:    {} bytes", size);
    }
    println!(
        "    Created: {}",
        asset.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
}

fn print_style_page(page: &Page<Style>) {
    if page.items.is_empty() {
        println!("{}", "No styles found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Showing {} of {} style(s):", page.items.len(), page.total).bold()
    );
    println!();
    for style in &page.items {
        print_style(style);
        println!();
    }
}

fn print_style(style: &Style) {
    let status = if style.is_ready() {
        style.status.green()
    } else {
        style.status.yellow()
    };

    println!("  {} {}", "▸".cyan(), style.name.bold());
    println!("    ID:      {}", style.id.dimmed());
    println!("    Status:  {}", status);
    if let Some(trigger) = &style.trigger_word {
        println!("    Trigger: {}", trigger.cyan());
    }
    println!(
        "    Created: {}",
        style.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
}
