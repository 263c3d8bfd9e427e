//! User settings and usage statistics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::export::{ExportFormat, ExportQuality};
use crate::platform::Platform;

/// Hours of manual editing saved per exported clip.
pub const HOURS_SAVED_PER_CLIP: f64 = 0.25;

/// Day labels for the weekly activity chart, Monday first.
pub const WEEK_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Which notifications the user wants to receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub export_complete: bool,
    pub weekly_report: bool,
    pub tips: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            export_complete: true,
            weekly_report: true,
            tips: true,
        }
    }
}

/// Per-user preferences applied across the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub default_quality: ExportQuality,
    pub default_format: ExportFormat,
    pub favorite_caption_styles: Vec<String>,
    pub platform_preferences: Vec<Platform>,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_quality: ExportQuality::High,
            default_format: ExportFormat::Mp4,
            favorite_caption_styles: vec!["bold".to_string()],
            platform_preferences: vec![Platform::Tiktok, Platform::Instagram],
            notifications: NotificationSettings::default(),
        }
    }
}

/// Clips produced on one day of the activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DayActivity {
    pub day: String,
    pub clips: u32,
}

/// Lifetime usage counters shown on the dashboard.
///
/// `weekly_activity` is display data refreshed on load rather than a
/// persisted counter, so it deserializes to empty when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_videos_processed: u64,
    pub clips_created: u64,
    pub hours_saved: f64,
    #[serde(default)]
    pub weekly_activity: Vec<DayActivity>,
}

impl UserStats {
    /// Counts one processed source video.
    pub fn record_video(&mut self) {
        self.total_videos_processed += 1;
    }

    /// Counts newly created clips and the editing time they saved.
    pub fn record_clips(&mut self, count: u64) {
        self.clips_created += count;
        self.hours_saved += count as f64 * HOURS_SAVED_PER_CLIP;
    }
}
