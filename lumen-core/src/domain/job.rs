//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Snapshot of one asynchronous unit of remote work
///
/// Jobs are created by a submission call and mutated only by the remote API.
/// A `Job` value is whatever the remote reported at the time of the read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    /// Display classification ("image", "video", ...). Never drives behavior.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Advisory completion fraction in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JobOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Job lifecycle status
///
/// Progression is pending -> processing -> {completed | failed | cancelled}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

/// Output of a completed job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOutput {
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Pending,
        JobStatus::Processing,
        JobStatus::Completed,
        JobStatus::Failed,
        JobStatus::Cancelled,
    ];

    /// Whether no further transitions can occur
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known job status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown job status: {}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for JobStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

impl Job {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Output locators, empty unless the job completed with a result
    pub fn output_urls(&self) -> &[String] {
        match (&self.status, &self.result) {
            (JobStatus::Completed, Some(output)) => &output.urls,
            _ => &[],
        }
    }

    /// Remote-reported failure message, only for failed jobs
    pub fn failure_message(&self) -> Option<&str> {
        if self.status == JobStatus::Failed {
            self.error.as_deref()
        } else {
            None
        }
    }

    /// Advisory progress as a whole percentage in [0, 100]
    pub fn progress_percent(&self) -> Option<u8> {
        self.progress
            .filter(|p| p.is_finite())
            .map(|p| (p.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(status: &str) -> serde_json::Value {
        json!({
            "id": "job_123",
            "status": status,
            "type": "image",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:06Z",
        })
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Processing".parse::<JobStatus>(), Ok(JobStatus::Processing));
        assert_eq!(" failed ".parse::<JobStatus>(), Ok(JobStatus::Failed));
        assert!("all".parse::<JobStatus>().is_err());
        assert!("done".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        for status in JobStatus::ALL {
            let encoded = serde_json::to_value(status).unwrap();
            assert_eq!(encoded, json!(status.as_str()));
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_deserialize_completed_job() {
        let mut value = sample("completed");
        value["completed_at"] = json!("2024-05-01T10:00:06Z");
        value["progress"] = json!(1.0);
        value["result"] = json!({
            "urls": ["https://cdn.example.com/out.png"],
            "metadata": { "seed": 42 }
        });

        let job: Job = serde_json::from_value(value).unwrap();
        assert_eq!(job.kind, "image");
        assert!(job.is_terminal());
        assert_eq!(job.output_urls(), ["https://cdn.example.com/out.png"]);
        assert_eq!(job.result.as_ref().unwrap().metadata["seed"], json!(42));
        assert_eq!(job.progress_percent(), Some(100));
        assert!(job.failure_message().is_none());
    }

    #[test]
    fn test_deserialize_failed_job() {
        let mut value = sample("failed");
        value["error"] = json!("NSFW content detected");

        let job: Job = serde_json::from_value(value).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.failure_message(), Some("NSFW content detected"));
        assert!(job.output_urls().is_empty());
    }

    #[test]
    fn test_result_without_urls_defaults() {
        let mut value = sample("completed");
        value["result"] = json!({});

        let job: Job = serde_json::from_value(value).unwrap();
        assert!(job.output_urls().is_empty());
        assert!(job.result.unwrap().metadata.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut job: Job = serde_json::from_value(sample("processing")).unwrap();
        assert_eq!(job.progress_percent(), None);

        job.progress = Some(0.456);
        assert_eq!(job.progress_percent(), Some(46));

        job.progress = Some(1.7);
        assert_eq!(job.progress_percent(), Some(100));

        job.progress = Some(-0.2);
        assert_eq!(job.progress_percent(), Some(0));
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let job: Job = serde_json::from_value(sample("pending")).unwrap();
        let encoded = serde_json::to_value(&job).unwrap();
        assert_eq!(encoded["type"], json!("image"));
        assert!(encoded.get("kind").is_none());
        assert!(encoded.get("result").is_none());
    }
}
