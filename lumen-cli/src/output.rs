//! Terminal output
//!
//! Human-readable rendering of jobs plus the JSON envelope mode.

use anyhow::Result;
use colored::*;
use lumen_client::GatewayError;
use lumen_core::domain::job::{Job, JobStatus};
use lumen_core::dto::outcome::OperationResult;
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a gateway result either as a JSON envelope or through `human`
///
/// In JSON mode a failure is still printed as an envelope, then reported as
/// an error so the process exits non-zero.
pub fn emit<T: Serialize>(
    json: bool,
    result: std::result::Result<T, GatewayError>,
    human: impl FnOnce(&T),
) -> Result<()> {
    if json {
        let envelope = OperationResult::from(result);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        if let Some(error) = envelope.error() {
            anyhow::bail!("{}", error);
        }
        return Ok(());
    }

    let value = result?;
    human(&value);
    Ok(())
}

/// Print a job summary line block
pub fn print_job_summary(job: &Job) {
    println!("  {} Job {}", "▸".cyan(), job.id.dimmed());
    println!("    Type:     {}", job.kind);
    println!("    Status:   {}", colorize_status(job.status));
    println!(
        "    Created:  {}",
        job.created_at.format(TIME_FORMAT).to_string().dimmed()
    );
    if let Some(percent) = job.progress_percent().filter(|_| !job.is_terminal()) {
        println!("    Progress: {}%", percent);
    }
    println!();
}

/// Print detailed job information
///
/// A failed job is a successful read: its remote error is shown, not raised.
pub fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job.id.cyan());
    println!("  Type:      {}", job.kind);
    println!("  Status:    {}", colorize_status(job.status));
    println!("  Created:   {}", job.created_at.format(TIME_FORMAT));
    println!("  Updated:   {}", job.updated_at.format(TIME_FORMAT));

    if let Some(completed) = job.completed_at {
        println!("  Completed: {}", completed.format(TIME_FORMAT));
        let seconds = completed.signed_duration_since(job.created_at).num_seconds();
        println!("  Duration:  {}s", seconds);
    }

    if let Some(percent) = job.progress_percent().filter(|_| !job.is_terminal()) {
        println!("  Progress:  {}%", percent);
    }

    let urls = job.output_urls();
    if !urls.is_empty() {
        println!("\n{}", "Outputs:".bold());
        for url in urls {
            println!("  {}", url.green());
        }
    }

    if let Some(metadata) = job.result.as_ref().map(|r| &r.metadata).filter(|m| !m.is_empty()) {
        println!("\n{}", "Metadata:".bold());
        for (key, value) in metadata {
            println!("  {} = {}", key.cyan(), value);
        }
    }

    if let Some(message) = job.failure_message() {
        println!("\n{}", "Error:".bold());
        println!("{}", message.red());
    }
}

/// Print a deletion outcome
pub fn print_deleted(what: &str, id: &str, deleted: bool) {
    if deleted {
        println!("{}", format!("✓ {} {} deleted", what, id).green().bold());
    } else {
        println!("{}", format!("{} {} was already gone", what, id).yellow());
    }
}

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        JobStatus::Pending => label.yellow(),
        JobStatus::Processing => label.cyan(),
        JobStatus::Completed => label.green(),
        JobStatus::Failed => label.red(),
        JobStatus::Cancelled => label.dimmed(),
    }
}
