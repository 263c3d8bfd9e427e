//! Source video projects tracked on the dashboard.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a project's highlight detection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Detection is still running.
    #[default]
    Processing,
    /// Candidates are ready for review.
    Ready,
    /// Detection failed; the project keeps its slot so the user can retry.
    Failed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Processing => "processing",
            ProjectStatus::Ready => "ready",
            ProjectStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An uploaded source video and the clips derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub upload_date: DateTime<Utc>,
    /// Number of candidates detected so far.
    pub clip_count: u32,
    /// Source duration in seconds.
    pub duration: f64,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl Project {
    /// Creates a freshly uploaded project awaiting detection.
    pub fn new(title: impl Into<String>, video_url: impl Into<String>, duration: f64) -> Self {
        Self {
            id: format!("project-{}", Utc::now().timestamp_millis()),
            title: title.into(),
            video_url: video_url.into(),
            thumbnail: None,
            upload_date: Utc::now(),
            clip_count: 0,
            duration,
            status: ProjectStatus::Processing,
        }
    }

    /// Marks detection as finished with the given number of candidates.
    pub fn ready(mut self, clip_count: u32) -> Self {
        self.clip_count = clip_count;
        self.status = ProjectStatus::Ready;
        self
    }

    /// Marks detection as failed.
    pub fn fail(mut self) -> Self {
        self.status = ProjectStatus::Failed;
        self
    }
}
