//! Generation command handlers
//!
//! Each command builds a submission for one generation family and optionally
//! waits for the job to reach a terminal status.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::*;
use lumen_client::{HttpGateway, WaitOptions, submit_and_wait};
use lumen_core::domain::job::{Job, JobStatus};
use lumen_core::dto::job::{GenerationKind, SubmitRequest};
use serde_json::{Value as JsonValue, json};

use crate::config::Config;
use crate::output::{emit, print_job_details};
use crate::params::{build_parameters, parse_key_val};

/// Options shared by every submission
#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Model name (see `lumen models`); unknown names use the family default
    #[arg(short, long)]
    model: Option<String>,

    /// Extra parameters as key=value pairs (values parsed as JSON when possible)
    #[arg(short, long = "param", value_parser = parse_key_val)]
    params: Vec<(String, JsonValue)>,

    /// Completion webhook for this job
    #[arg(long)]
    callback_url: Option<String>,

    /// Wait for the job to finish
    #[arg(short, long)]
    wait: bool,

    /// Wait budget in seconds (default: 120, or 300 for video)
    #[arg(long, requires = "wait")]
    timeout: Option<u64>,

    /// Milliseconds between status polls while waiting
    #[arg(long, default_value_t = 2000, requires = "wait")]
    poll_interval: u64,
}

impl SubmitArgs {
    fn wait_options(&self, kind: GenerationKind) -> Option<WaitOptions> {
        if !self.wait {
            return None;
        }

        let mut options = WaitOptions::for_kind(kind)
            .with_poll_interval(Duration::from_millis(self.poll_interval));
        if let Some(secs) = self.timeout {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        Some(options)
    }

    fn into_request(
        self,
        kind: GenerationKind,
        named: Vec<(&'static str, Option<JsonValue>)>,
    ) -> SubmitRequest {
        SubmitRequest {
            kind,
            model: self.model,
            parameters: build_parameters(named, self.params),
            callback_url: self.callback_url,
        }
    }
}

#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Text prompt
    prompt: String,

    #[arg(long)]
    negative_prompt: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Number of images to generate
    #[arg(short = 'n', long)]
    num_images: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    submit: SubmitArgs,
}

#[derive(Args, Debug)]
pub struct VideoArgs {
    /// Text prompt
    prompt: String,

    /// Start frame for image-to-video
    #[arg(long)]
    image_url: Option<String>,

    /// Clip length in seconds
    #[arg(long)]
    duration: Option<u32>,

    /// Aspect ratio such as 16:9
    #[arg(long)]
    aspect_ratio: Option<String>,

    #[command(flatten)]
    submit: SubmitArgs,
}

#[derive(Args, Debug)]
pub struct UpscaleArgs {
    /// Image to enhance
    image_url: String,

    /// Upscale factor
    #[arg(long)]
    scale: Option<u32>,

    #[command(flatten)]
    submit: SubmitArgs,
}

#[derive(Args, Debug)]
pub struct TrainStyleArgs {
    /// Name of the new style
    #[arg(long)]
    name: String,

    /// Reference images (repeat the flag)
    #[arg(long = "image-url", required = true)]
    image_urls: Vec<String>,

    /// Token that activates the style in prompts
    #[arg(long)]
    trigger_word: Option<String>,

    /// Training steps
    #[arg(long)]
    steps: Option<u32>,

    #[command(flatten)]
    submit: SubmitArgs,
}

pub async fn image(gateway: &HttpGateway, args: ImageArgs, config: &Config) -> Result<()> {
    let named = vec![
        ("prompt", Some(json!(args.prompt))),
        ("negative_prompt", args.negative_prompt.map(JsonValue::from)),
        ("width", args.width.map(JsonValue::from)),
        ("height", args.height.map(JsonValue::from)),
        ("num_images", args.num_images.map(JsonValue::from)),
        ("seed", args.seed.map(JsonValue::from)),
    ];
    run(gateway, GenerationKind::Image, args.submit, named, config).await
}

pub async fn video(gateway: &HttpGateway, args: VideoArgs, config: &Config) -> Result<()> {
    let named = vec![
        ("prompt", Some(json!(args.prompt))),
        ("image_url", args.image_url.map(JsonValue::from)),
        ("duration", args.duration.map(JsonValue::from)),
        ("aspect_ratio", args.aspect_ratio.map(JsonValue::from)),
    ];
    run(gateway, GenerationKind::Video, args.submit, named, config).await
}

pub async fn upscale(gateway: &HttpGateway, args: UpscaleArgs, config: &Config) -> Result<()> {
    let named = vec![
        ("image_url", Some(json!(args.image_url))),
        ("scale", args.scale.map(JsonValue::from)),
    ];
    run(gateway, GenerationKind::Enhance, args.submit, named, config).await
}

pub async fn train_style(gateway: &HttpGateway, args: TrainStyleArgs, config: &Config) -> Result<()> {
    let named = vec![
        ("name", Some(json!(args.name))),
        ("images", Some(json!(args.image_urls))),
        ("trigger_word", args.trigger_word.map(JsonValue::from)),
        ("steps", args.steps.map(JsonValue::from)),
    ];
    run(gateway, GenerationKind::StyleTraining, args.submit, named, config).await
}

async fn run(
    gateway: &HttpGateway,
    kind: GenerationKind,
    submit: SubmitArgs,
    named: Vec<(&'static str, Option<JsonValue>)>,
    config: &Config,
) -> Result<()> {
    let wait = submit.wait_options(kind);
    let request = submit.into_request(kind, named);

    let result = submit_and_wait(gateway, &request, wait).await;
    emit(config.json, result, |job| print_submission(job, wait.is_some()))
}

fn print_submission(job: &Job, waited: bool) {
    match job.status {
        JobStatus::Completed => println!("{}", "✓ Generation completed".green().bold()),
        JobStatus::Failed => println!("{}", "✗ Generation failed".red().bold()),
        JobStatus::Cancelled => println!("{}", "Generation was cancelled".yellow().bold()),
        _ => println!("{}", "✓ Job submitted".green().bold()),
    }
    println!();
    print_job_details(job);

    if !waited && !job.is_terminal() {
        println!();
        println!(
            "{}",
            format!("Follow it with: lumen job wait {}", job.id).dimmed()
        );
    }
}
