//! Job command handlers
//!
//! Handles all job-related CLI commands including fetching, listing,
//! deleting and waiting on jobs.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use lumen_client::{HttpGateway, JobGateway, wait};
use lumen_core::domain::job::{Job, JobStatus};
use lumen_core::dto::job::JobFilter;
use lumen_core::dto::listing::Page;

use crate::config::Config;
use crate::output::{emit, print_deleted, print_job_details, print_job_summary};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Get job details
    Get {
        /// Job ID
        id: String,
    },
    /// List jobs
    List {
        /// Status filter (pending, processing, completed, failed, cancelled, all)
        #[arg(long, default_value = "all")]
        status: String,

        /// Type filter (image, video, ..., all)
        #[arg(long = "type", default_value = "all")]
        kind: String,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },
    /// Delete a job
    Delete {
        /// Job ID
        id: String,
    },
    /// Wait for a job to finish
    Wait {
        /// Job ID
        id: String,

        /// Wait budget in seconds
        #[arg(long, default_value_t = 120)]
        timeout: u64,

        /// Milliseconds between status polls
        #[arg(long, default_value_t = 2000)]
        poll_interval: u64,
    },
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
pub async fn handle_job_command(
    gateway: &HttpGateway,
    command: JobCommands,
    config: &Config,
) -> Result<()> {
    match command {
        JobCommands::Get { id } => {
            let result = gateway.fetch_job(&id).await;
            emit(config.json, result, print_job_details)
        }
        JobCommands::List {
            status,
            kind,
            limit,
            offset,
        } => {
            let filter = build_filter(status, kind, limit, offset)?;
            let result = gateway.list_jobs(&filter).await;
            emit(config.json, result, print_job_page)
        }
        JobCommands::Delete { id } => {
            let result = gateway.delete_job(&id).await;
            emit(config.json, result, |deleted| print_deleted("Job", &id, *deleted))
        }
        JobCommands::Wait {
            id,
            timeout,
            poll_interval,
        } => {
            let result = wait(gateway, &id, timeout, poll_interval).await;
            emit(config.json, result, print_job_details)
        }
    }
}

/// Build the listing filter, rejecting statuses the remote would not know
///
/// `"all"` is passed through so the filter can drop it.
fn build_filter(
    status: String,
    kind: String,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<JobFilter> {
    let status = if status.trim().eq_ignore_ascii_case("all") {
        status
    } else {
        status.parse::<JobStatus>()?.as_str().to_string()
    };

    let mut filter = JobFilter::new().status(status).kind(kind);
    filter.page.limit = limit;
    filter.page.offset = offset;
    Ok(filter)
}

fn print_job_page(page: &Page<Job>) {
    if page.items.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Showing {} of {} job(s):", page.items.len(), page.total).bold()
    );
    println!();
    for job in &page.items {
        print_job_summary(job);
    }
}
