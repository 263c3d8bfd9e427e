//! Persisted records of finished exports.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::job::ExportJob;
use crate::platform::{badges_for, hashtags_for, platform_tag};

/// Base URL for shareable clip links.
pub const SHARE_BASE_URL: &str = "https://share.reclip.app";

/// A finished export as shown in the clip library.
///
/// Records outlive the queue: jobs are cleared after a session while
/// records persist in storage. The `id` is the id of the job that
/// produced the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportedClipRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Target platform tag, or "generic" for custom exports.
    pub platform: String,
    pub platform_badges: Vec<String>,
    pub file_size: String,
    pub export_date: DateTime<Utc>,
    pub download_url: String,
    pub share_link: String,
    pub hashtags: Vec<String>,
}

impl ExportedClipRecord {
    /// Builds the library record for a job.
    ///
    /// Meant for completed jobs, but tolerates missing output fields so
    /// the library can still render a row for partially recorded jobs:
    /// the size falls back to "Unknown" and the export date to now.
    pub fn for_job(job: &ExportJob) -> Self {
        Self {
            id: job.id.as_str().to_string(),
            title: job.clip_title.clone(),
            thumbnail: job.thumbnail.clone(),
            platform: platform_tag(job.config.platform),
            platform_badges: badges_for(job.config.platform),
            file_size: job
                .file_size
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            export_date: job.completed_at.unwrap_or_else(Utc::now),
            download_url: job.download_url.clone().unwrap_or_default(),
            share_link: format!("{}/{}", SHARE_BASE_URL, job.id),
            hashtags: hashtags_for(job.config.platform),
        }
    }
}
