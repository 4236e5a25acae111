//! Poll-until-terminal loop
//!
//! Turns a submitted job into a terminal job record by fetching it at a fixed
//! cadence until it completes, fails or is cancelled, or until the wait
//! budget runs out.
//!
//! A job that ends `failed` or `cancelled` is a successful wait. The error
//! side is reserved for "the outcome could not be determined": a fetch error
//! or the wait deadline elapsing.

use std::time::Duration;

use lumen_core::domain::job::Job;
use lumen_core::dto::job::{GenerationKind, SubmitRequest};
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::error::{GatewayError, Result};
use crate::gateway::JobGateway;

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(120_000);
pub const DEFAULT_VIDEO_WAIT_TIMEOUT: Duration = Duration::from_millis(300_000);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2_000);

/// Budget and cadence for one wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total wall-clock budget for the whole wait
    pub timeout: Duration,
    /// Spacing between consecutive fetches
    pub poll_interval: Duration,
}

impl WaitOptions {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Defaults for a generation family; video gets the longer budget
    pub fn for_kind(kind: GenerationKind) -> Self {
        let timeout = match kind {
            GenerationKind::Video => DEFAULT_VIDEO_WAIT_TIMEOUT,
            _ => DEFAULT_WAIT_TIMEOUT,
        };
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }

    /// Options in the units the explicit wait call takes
    pub fn from_secs_and_millis(timeout_secs: u64, poll_interval_ms: u64) -> Self {
        Self::new(
            Duration::from_secs(timeout_secs),
            Duration::from_millis(poll_interval_ms),
        )
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(GatewayError::InvalidRequest(
                "poll_interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Poll a job until it reaches a terminal status
///
/// The deadline is checked before every fetch, so no fetch starts once the
/// budget is spent. Fetch failures are returned immediately without retry.
/// Fetches are strictly sequential and the sleep between them yields to the
/// runtime.
pub async fn wait_for_terminal<G>(gateway: &G, job_id: &str, options: WaitOptions) -> Result<Job>
where
    G: JobGateway + ?Sized,
{
    options.validate()?;

    let started = Instant::now();
    // A budget too large to represent as an instant never expires
    let deadline = started.checked_add(options.timeout);
    let mut polls: u32 = 0;

    info!(
        "Waiting for job {} (timeout: {:?}, interval: {:?})",
        job_id, options.timeout, options.poll_interval
    );

    while deadline.is_none_or(|deadline| Instant::now() < deadline) {
        polls += 1;
        let job = gateway.fetch_job(job_id).await?;

        debug!(
            "Poll {} for job {}: {} (progress: {:?})",
            polls, job_id, job.status, job.progress
        );

        if job.is_terminal() {
            info!(
                "Job {} reached {} after {} poll(s) in {:?}",
                job_id,
                job.status,
                polls,
                started.elapsed()
            );
            return Ok(job);
        }

        let pause = match deadline {
            Some(deadline) => options
                .poll_interval
                .min(deadline.saturating_duration_since(Instant::now())),
            None => options.poll_interval,
        };
        time::sleep(pause).await;
    }

    info!("Gave up on job {} after {} poll(s)", job_id, polls);

    Err(GatewayError::timeout(format!(
        "job {} did not complete within {:?}",
        job_id, options.timeout
    )))
}

/// Submit a request and, when asked, wait for the job to finish
///
/// With `wait == None` the initial snapshot is returned as-is. A snapshot that
/// is already terminal is returned without polling.
pub async fn submit_and_wait<G>(
    gateway: &G,
    request: &SubmitRequest,
    wait: Option<WaitOptions>,
) -> Result<Job>
where
    G: JobGateway + ?Sized,
{
    let job = gateway.submit(request).await?;

    match wait {
        Some(options) if !job.is_terminal() => wait_for_terminal(gateway, &job.id, options).await,
        _ => Ok(job),
    }
}

/// Explicit wait on an existing job
pub async fn wait<G>(gateway: &G, job_id: &str, timeout_secs: u64, poll_interval_ms: u64) -> Result<Job>
where
    G: JobGateway + ?Sized,
{
    let options = WaitOptions::from_secs_and_millis(timeout_secs, poll_interval_ms);
    wait_for_terminal(gateway, job_id, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lumen_core::domain::job::{JobOutput, JobStatus};
    use lumen_core::dto::job::JobFilter;
    use lumen_core::dto::listing::Page;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    enum Step {
        Status(JobStatus),
        Fail(u16),
    }

    /// Gateway that replays a script of fetch outcomes and records fetch times
    struct ScriptedGateway {
        initial: JobStatus,
        steps: Mutex<VecDeque<Step>>,
        fetches: Mutex<Vec<Instant>>,
    }

    impl ScriptedGateway {
        fn new(steps: Vec<Step>) -> Self {
            Self {
                initial: JobStatus::Pending,
                steps: Mutex::new(steps.into()),
                fetches: Mutex::new(Vec::new()),
            }
        }

        fn submitting(mut self, initial: JobStatus) -> Self {
            self.initial = initial;
            self
        }

        fn fetch_times(&self) -> Vec<Instant> {
            self.fetches.lock().unwrap().clone()
        }
    }

    fn job(status: JobStatus) -> Job {
        let now = chrono::Utc::now();
        Job {
            id: "job_1".to_string(),
            status,
            kind: "image".to_string(),
            created_at: now,
            updated_at: now,
            completed_at: status.is_terminal().then_some(now),
            progress: None,
            result: (status == JobStatus::Completed).then(|| JobOutput {
                urls: vec!["https://cdn.example.com/out.png".to_string()],
                metadata: Default::default(),
            }),
            error: (status == JobStatus::Failed).then(|| "model crashed".to_string()),
        }
    }

    #[async_trait]
    impl JobGateway for ScriptedGateway {
        async fn submit(&self, _request: &SubmitRequest) -> Result<Job> {
            Ok(job(self.initial))
        }

        async fn fetch_job(&self, _job_id: &str) -> Result<Job> {
            self.fetches.lock().unwrap().push(Instant::now());
            // An exhausted script keeps reporting the job as processing
            let step = self.steps.lock().unwrap().pop_front();
            match step.unwrap_or(Step::Status(JobStatus::Processing)) {
                Step::Status(status) => Ok(job(status)),
                Step::Fail(code) => Err(GatewayError::from_status(code, "", "job job_1")),
            }
        }

        async fn delete_job(&self, _job_id: &str) -> Result<bool> {
            Ok(true)
        }

        async fn list_jobs(&self, _filter: &JobFilter) -> Result<Page<Job>> {
            Ok(Page::default())
        }
    }

    fn opts(timeout_ms: u64, interval_ms: u64) -> WaitOptions {
        WaitOptions::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(interval_ms),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_terminal_status_is_a_successful_wait() {
        for status in [JobStatus::Completed, JobStatus::Failed, JobStatus::Cancelled] {
            let gateway = ScriptedGateway::new(vec![Step::Status(status)]);
            let job = wait_for_terminal(&gateway, "job_1", opts(120_000, 2_000))
                .await
                .unwrap();
            assert_eq!(job.status, status);
            assert_eq!(gateway.fetch_times().len(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_carries_remote_error() {
        let gateway = ScriptedGateway::new(vec![
            Step::Status(JobStatus::Processing),
            Step::Status(JobStatus::Failed),
        ]);

        let job = wait_for_terminal(&gateway, "job_1", WaitOptions::default())
            .await
            .unwrap();
        assert_eq!(job.failure_message(), Some("model crashed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_once_per_observation_at_fixed_interval() {
        let gateway = ScriptedGateway::new(vec![
            Step::Status(JobStatus::Pending),
            Step::Status(JobStatus::Pending),
            Step::Status(JobStatus::Processing),
            Step::Status(JobStatus::Completed),
        ]);

        let job = wait_for_terminal(&gateway, "job_1", opts(120_000, 2_000))
            .await
            .unwrap();
        assert_eq!(job.status, JobStatus::Completed);

        let times = gateway.fetch_times();
        assert_eq!(times.len(), 4);
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::from_secs(2));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_with_single_url_after_three_fetches() {
        let gateway = ScriptedGateway::new(vec![
            Step::Status(JobStatus::Processing),
            Step::Status(JobStatus::Processing),
            Step::Status(JobStatus::Completed),
        ]);
        let request = SubmitRequest::new(GenerationKind::Image);

        let started = Instant::now();
        let job = submit_and_wait(&gateway, &request, Some(opts(120_000, 2_000)))
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.output_urls(), ["https://cdn.example.com/out.png"]);
        let times = gateway.fetch_times();
        assert_eq!(times.len(), 3);
        assert_eq!(times[1] - times[0], Duration::from_secs(2));
        assert_eq!(times[2] - times[1], Duration::from_secs(2));
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_job_never_finishes() {
        let gateway = ScriptedGateway::new(Vec::new());

        let started = Instant::now();
        let err = wait_for_terminal(&gateway, "job_1", opts(5_000, 2_000))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "job job_1 did not complete within 5s");

        let fetches = gateway.fetch_times();
        assert!((2..=3).contains(&fetches.len()), "{} fetches", fetches.len());
        for at in &fetches {
            assert!(*at - started < Duration::from_millis(5_000));
        }
        assert!(started.elapsed() <= Duration::from_millis(7_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_never_fetches() {
        let gateway = ScriptedGateway::new(vec![Step::Status(JobStatus::Completed)]);

        let err = wait_for_terminal(&gateway, "job_1", opts(0, 2_000))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert!(gateway.fetch_times().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_is_returned_without_more_polls() {
        let gateway = ScriptedGateway::new(vec![
            Step::Status(JobStatus::Processing),
            Step::Fail(503),
            Step::Status(JobStatus::Completed),
        ]);

        let err = wait_for_terminal(&gateway, "job_1", opts(120_000, 2_000))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(503));
        assert!(!err.is_timeout());
        assert_eq!(gateway.fetch_times().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_during_wait_propagates() {
        let gateway = ScriptedGateway::new(vec![Step::Fail(404)]);

        let err = wait(&gateway, "job_1", 120, 2_000).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_timeout_still_polls() {
        let gateway = ScriptedGateway::new(vec![
            Step::Status(JobStatus::Processing),
            Step::Fail(404),
        ]);

        let err = wait(&gateway, "job_1", u64::MAX, 2_000).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(gateway.fetch_times().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_without_wait_returns_initial_snapshot() {
        let gateway = ScriptedGateway::new(vec![Step::Status(JobStatus::Completed)]);
        let request = SubmitRequest::new(GenerationKind::Video);

        let job = submit_and_wait(&gateway, &request, None).await.unwrap();
        assert_eq!(job.status, JobStatus::Pending);
        assert!(gateway.fetch_times().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_submission_skips_polling() {
        let gateway = ScriptedGateway::new(Vec::new()).submitting(JobStatus::Completed);
        let request = SubmitRequest::new(GenerationKind::Image);

        let job = submit_and_wait(&gateway, &request, Some(WaitOptions::default()))
            .await
            .unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert!(gateway.fetch_times().is_empty());
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let gateway = ScriptedGateway::new(Vec::new());

        let err = wait(&gateway, "job_1", 10, 0).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
        assert!(gateway.fetch_times().is_empty());
    }

    #[test]
    fn test_defaults_per_kind() {
        assert_eq!(WaitOptions::for_kind(GenerationKind::Image).timeout, Duration::from_secs(120));
        assert_eq!(WaitOptions::for_kind(GenerationKind::Video).timeout, Duration::from_secs(300));
        assert_eq!(WaitOptions::default().poll_interval, Duration::from_secs(2));
    }
}
