//! Export job lifecycle: identifiers, status, and state transitions.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::candidate::ClipCandidate;
use crate::export::ExportConfig;

/// Error message recorded on jobs cancelled by the user.
pub const CANCELLED_BY_USER: &str = "Cancelled by user";

/// Placeholder ETA shown before the first progress tick, in seconds.
pub const INITIAL_ETA_SECS: u64 = 5;

/// Unique identifier for an export job.
///
/// Encodes the source clip and enqueue time: `export-{clip_id}-{millis}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Mints an id for an export of the given clip, stamped with the
    /// current wall-clock time.
    pub fn for_clip(clip_id: &str) -> Self {
        Self(format!("export-{}-{}", clip_id, Utc::now().timestamp_millis()))
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an export job.
///
/// Jobs move `Queued -> Processing -> Complete | Failed`. Cancellation is
/// a failure with [`CANCELLED_BY_USER`] as the error. Terminal states are
/// never left.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    #[default]
    Queued,
    Processing,
    Complete,
    Failed,
}

impl ExportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStatus::Queued => "queued",
            ExportStatus::Processing => "processing",
            ExportStatus::Complete => "complete",
            ExportStatus::Failed => "failed",
        }
    }

    /// Whether the job still occupies the queue (queued or processing).
    pub fn is_active(&self) -> bool {
        matches!(self, ExportStatus::Queued | ExportStatus::Processing)
    }

    /// Whether the job has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportStatus::Complete | ExportStatus::Failed)
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One clip export moving through the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub id: JobId,
    pub clip_id: String,
    pub clip_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub status: ExportStatus,
    /// Render progress, 0..=100. Never decreases.
    #[serde(default)]
    pub progress: u8,
    /// Estimated seconds until completion.
    pub estimated_time_remaining: u64,
    pub config: ExportConfig,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Human-readable output size, e.g. "12.4 MB". Set on completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportJob {
    /// Creates a queued job for one candidate with the given configuration.
    pub fn for_candidate(clip: &ClipCandidate, config: ExportConfig) -> Self {
        Self {
            id: JobId::for_clip(&clip.id),
            clip_id: clip.id.clone(),
            clip_title: clip.title.clone(),
            thumbnail: clip.thumbnail.clone(),
            status: ExportStatus::Queued,
            progress: 0,
            estimated_time_remaining: INITIAL_ETA_SECS,
            config,
            created_at: Utc::now(),
            completed_at: None,
            file_size: None,
            download_url: None,
            error: None,
        }
    }

    /// Transitions the job to processing.
    pub fn start(mut self) -> Self {
        self.status = ExportStatus::Processing;
        self
    }

    /// Records a progress tick. Progress is clamped to 100 and never
    /// moves backwards.
    pub fn with_progress(mut self, progress: u8, eta_secs: u64) -> Self {
        self.progress = self.progress.max(progress.min(100));
        self.estimated_time_remaining = eta_secs;
        self
    }

    /// Transitions the job to complete with its output artifacts.
    pub fn complete_with(
        mut self,
        file_size: impl Into<String>,
        download_url: impl Into<String>,
    ) -> Self {
        self.status = ExportStatus::Complete;
        self.progress = 100;
        self.estimated_time_remaining = 0;
        self.completed_at = Some(Utc::now());
        self.file_size = Some(file_size.into());
        self.download_url = Some(download_url.into());
        self
    }

    /// Transitions the job to failed with an error message.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.status = ExportStatus::Failed;
        self.error = Some(error.into());
        self
    }

    /// Marks the job as cancelled by the user.
    pub fn cancel(self) -> Self {
        self.fail(CANCELLED_BY_USER)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the job was cancelled rather than failing on its own.
    pub fn is_cancelled(&self) -> bool {
        self.status == ExportStatus::Failed && self.error.as_deref() == Some(CANCELLED_BY_USER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candidate() -> ClipCandidate {
        ClipCandidate {
            id: "clip-3".to_string(),
            start_time: 42.0,
            end_time: 78.0,
            title: "Wait for it...".to_string(),
            score: 91,
            selected: true,
            thumbnail: Some("https://img.reclip.app/clip-3.jpg".to_string()),
        }
    }

    #[test]
    fn test_job_id_embeds_clip_id() {
        let id = JobId::for_clip("clip-3");
        assert!(id.as_str().starts_with("export-clip-3-"));
    }

    #[test]
    fn test_new_job_starts_queued() {
        let job = ExportJob::for_candidate(&sample_candidate(), ExportConfig::default());
        assert_eq!(job.status, ExportStatus::Queued);
        assert_eq!(job.progress, 0);
        assert_eq!(job.estimated_time_remaining, INITIAL_ETA_SECS);
        assert_eq!(job.clip_title, "Wait for it...");
        assert!(job.is_active());
    }

    #[test]
    fn test_lifecycle_transitions() {
        let job = ExportJob::for_candidate(&sample_candidate(), ExportConfig::default())
            .start()
            .with_progress(40, 2)
            .complete_with("12.4 MB", "https://downloads.reclip.app/x.mp4");
        assert_eq!(job.status, ExportStatus::Complete);
        assert_eq!(job.progress, 100);
        assert_eq!(job.estimated_time_remaining, 0);
        assert!(job.completed_at.is_some());
        assert!(job.is_terminal());
    }

    #[test]
    fn test_progress_never_decreases() {
        let job = ExportJob::for_candidate(&sample_candidate(), ExportConfig::default())
            .start()
            .with_progress(60, 2)
            .with_progress(30, 1);
        assert_eq!(job.progress, 60);
        assert_eq!(job.estimated_time_remaining, 1);
    }

    #[test]
    fn test_progress_is_capped() {
        let job = ExportJob::for_candidate(&sample_candidate(), ExportConfig::default())
            .start()
            .with_progress(250, 0);
        assert_eq!(job.progress, 100);
    }

    #[test]
    fn test_cancel_is_failure_with_reason() {
        let job = ExportJob::for_candidate(&sample_candidate(), ExportConfig::default()).cancel();
        assert_eq!(job.status, ExportStatus::Failed);
        assert_eq!(job.error.as_deref(), Some(CANCELLED_BY_USER));
        assert!(job.is_cancelled());
        assert!(job.completed_at.is_none());
    }

    #[test]
    fn test_plain_failure_is_not_cancelled() {
        let job = ExportJob::for_candidate(&sample_candidate(), ExportConfig::default())
            .fail("render crashed");
        assert!(job.is_terminal());
        assert!(!job.is_cancelled());
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let job = ExportJob::for_candidate(&sample_candidate(), ExportConfig::default());
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["clipId"], "clip-3");
        assert_eq!(json["status"], "queued");
        assert_eq!(json["estimatedTimeRemaining"], 5);
        // Unset optionals stay off the wire.
        assert!(json.get("fileSize").is_none());
        assert!(json.get("error").is_none());
    }
}
