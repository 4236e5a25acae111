//! Gateway trait
//!
//! The seam between callers and the remote job API. [`HttpGateway`] is the
//! production implementation; tests and embedders can supply their own.

use async_trait::async_trait;
use lumen_core::domain::job::Job;
use lumen_core::dto::job::{JobFilter, SubmitRequest};
use lumen_core::dto::listing::Page;

use crate::HttpGateway;
use crate::error::Result;

/// Job operations against a remote job-oriented API
///
/// Implementations never retry; every failure is returned to the caller.
#[async_trait]
pub trait JobGateway: Send + Sync {
    /// Creates a job on the remote side
    ///
    /// Returns the initial snapshot regardless of how long the work takes.
    async fn submit(&self, request: &SubmitRequest) -> Result<Job>;

    /// Reads the current state of a job
    ///
    /// Idempotent; fails with `NotFound` for unknown ids.
    async fn fetch_job(&self, job_id: &str) -> Result<Job>;

    /// Requests removal of a job
    ///
    /// `Ok(false)` means the remote no longer knew the job.
    async fn delete_job(&self, job_id: &str) -> Result<bool>;

    /// Lists jobs, re-querying the remote on every call
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Page<Job>>;
}

#[async_trait]
impl JobGateway for HttpGateway {
    async fn submit(&self, request: &SubmitRequest) -> Result<Job> {
        HttpGateway::submit(self, request).await
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Job> {
        self.get_job(job_id).await
    }

    async fn delete_job(&self, job_id: &str) -> Result<bool> {
        HttpGateway::delete_job(self, job_id).await
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Page<Job>> {
        HttpGateway::list_jobs(self, filter).await
    }
}
