//! Shared data models for the Reclip export pipeline.
//!
//! Every type that crosses a crate boundary lives here: clip candidates
//! produced by detection, export configuration and platform presets, the
//! export job lifecycle, persisted clip records, projects, and user
//! settings/stats. All wire-facing structs serialize with camelCase keys
//! so payloads stay byte-compatible with the web client.

pub mod candidate;
pub mod export;
pub mod job;
pub mod platform;
pub mod project;
pub mod record;
pub mod settings;
pub mod timefmt;

// Re-export common types
pub use candidate::{ClipCandidate, MIN_TRIM_SPAN_SECS};
pub use export::{CaptionOption, ExportConfig, ExportFormat, ExportQuality};
pub use job::{ExportJob, ExportStatus, JobId, CANCELLED_BY_USER, INITIAL_ETA_SECS};
pub use platform::{
    badges_for, hashtags_for, platform_tag, AspectRatio, Platform, PlatformPreset, MAX_HASHTAGS,
};
pub use project::{Project, ProjectStatus};
pub use record::{ExportedClipRecord, SHARE_BASE_URL};
pub use settings::{
    DayActivity, NotificationSettings, UserSettings, UserStats, HOURS_SAVED_PER_CLIP, WEEK_DAYS,
};
pub use timefmt::{format_duration, format_timestamp};
