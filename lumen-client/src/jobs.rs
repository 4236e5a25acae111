//! Job-related API endpoints

use lumen_core::domain::job::Job;
use lumen_core::dto::job::{GenerationKind, JobFilter, SubmitRequest};
use lumen_core::dto::listing::Page;
use lumen_core::models;
use reqwest::Method;
use tracing::{info, warn};

use crate::HttpGateway;
use crate::error::Result;
use crate::require_id;

impl HttpGateway {
    // =============================================================================
    // Generation
    // =============================================================================

    /// Submit a generation request
    ///
    /// The friendly model name is resolved through the routing tables; an
    /// unknown name falls back to the family default with a warning. The
    /// returned job is the remote's initial snapshot, usually `pending`.
    pub async fn submit(&self, request: &SubmitRequest) -> Result<Job> {
        let route = models::resolve(request.kind, request.model.as_deref());
        if route.fallback {
            warn!(
                "No {} model named {:?}, using default `{}`",
                request.kind,
                route.requested.as_deref().unwrap_or("<none>"),
                route.slug
            );
        }

        let mut body = request.body();
        if request.callback_url.is_none() {
            if let (Some(callback), Some(map)) = (&self.callback_url, body.as_object_mut()) {
                map.entry("webhook_url").or_insert_with(|| callback.clone().into());
            }
        }

        let url = match request.kind {
            GenerationKind::StyleTraining => {
                // An explicit base_model parameter is forwarded as given
                if let Some(map) = body.as_object_mut() {
                    map.entry("base_model").or_insert_with(|| route.slug.into());
                }
                self.endpoint(["v1", "styles", "train"])
            }
            kind => self.endpoint(
                ["v1", family_segment(kind)]
                    .into_iter()
                    .chain(route.slug.split('/')),
            ),
        };

        let response = self.request(Method::POST, url).json(&body).send().await?;
        let job: Job = self
            .handle_response(response, &format!("{} model {}", request.kind, route.slug))
            .await?;

        info!("Submitted {} job {} ({})", request.kind, job.id, job.status);
        Ok(job)
    }

    // =============================================================================
    // Job Records
    // =============================================================================

    /// Get a job by ID
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let job_id = require_id(job_id, "job")?;
        let url = self.endpoint(["v1", "jobs", job_id]);
        let response = self.request(Method::GET, url).send().await?;

        self.handle_response(response, &format!("job {}", job_id)).await
    }

    /// Delete a job
    ///
    /// Returns `false` when the remote no longer knows the job.
    pub async fn delete_job(&self, job_id: &str) -> Result<bool> {
        let job_id = require_id(job_id, "job")?;
        let url = self.endpoint(["v1", "jobs", job_id]);
        let response = self.request(Method::DELETE, url).send().await?;

        self.handle_delete_response(response, &format!("job {}", job_id))
            .await
    }

    /// List jobs
    ///
    /// Every call re-queries the remote; `"all"` filters are omitted.
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Page<Job>> {
        let url = self.endpoint(["v1", "jobs"]);
        let response = self
            .request(Method::GET, url)
            .query(&filter.query_pairs())
            .send()
            .await?;

        self.handle_response(response, "jobs").await
    }
}

fn family_segment(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Image => "image",
        GenerationKind::Video => "video",
        GenerationKind::Enhance => "enhance",
        GenerationKind::StyleTraining => "styles",
    }
}
