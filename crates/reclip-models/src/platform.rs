//! Target platforms and their export presets.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::{ExportFormat, ExportQuality};

/// Upper bound on hashtags attached to an exported clip.
pub const MAX_HASHTAGS: usize = 8;

/// Hashtags attached to every export regardless of platform.
const BASE_HASHTAGS: [&str; 4] = ["#viral", "#trending", "#fyp", "#content"];

/// Social platform a clip is exported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Instagram,
    Youtube,
    Linkedin,
}

/// Recommended export settings for a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPreset {
    pub quality: ExportQuality,
    pub format: ExportFormat,
    pub aspect_ratio: AspectRatio,
    pub max_duration_secs: u32,
}

impl Platform {
    /// Every supported platform, in UI display order.
    pub const ALL: [Platform; 4] = [
        Platform::Tiktok,
        Platform::Instagram,
        Platform::Youtube,
        Platform::Linkedin,
    ];

    /// Wire identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::Linkedin => "linkedin",
        }
    }

    /// Human-readable name shown in the UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Tiktok => "TikTok",
            Platform::Instagram => "Instagram Reels",
            Platform::Youtube => "YouTube Shorts",
            Platform::Linkedin => "LinkedIn",
        }
    }

    /// Recommended export settings for this platform.
    pub fn preset(&self) -> PlatformPreset {
        match self {
            Platform::Tiktok => PlatformPreset {
                quality: ExportQuality::High,
                format: ExportFormat::Mp4,
                aspect_ratio: AspectRatio::PORTRAIT,
                max_duration_secs: 180,
            },
            Platform::Instagram => PlatformPreset {
                quality: ExportQuality::High,
                format: ExportFormat::Mp4,
                aspect_ratio: AspectRatio::PORTRAIT,
                max_duration_secs: 90,
            },
            Platform::Youtube => PlatformPreset {
                quality: ExportQuality::High,
                format: ExportFormat::Mp4,
                aspect_ratio: AspectRatio::PORTRAIT,
                max_duration_secs: 60,
            },
            Platform::Linkedin => PlatformPreset {
                quality: ExportQuality::Medium,
                format: ExportFormat::Mp4,
                aspect_ratio: AspectRatio::SQUARE,
                max_duration_secs: 120,
            },
        }
    }

    /// Platform-specific hashtag pool.
    pub fn hashtags(&self) -> &'static [&'static str] {
        match self {
            Platform::Tiktok => &["#tiktok", "#tiktokviral", "#foryou", "#foryoupage"],
            Platform::Instagram => &["#reels", "#instareels", "#instagram", "#explore"],
            Platform::Youtube => &["#shorts", "#youtubeshorts", "#youtube", "#subscribe"],
            Platform::Linkedin => &["#linkedin", "#professional", "#business", "#networking"],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiktok" => Ok(Platform::Tiktok),
            "instagram" => Ok(Platform::Instagram),
            "youtube" => Ok(Platform::Youtube),
            "linkedin" => Ok(Platform::Linkedin),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown platform: {0}")]
pub struct PlatformParseError(String);

/// Hashtags for an export targeting the given platform.
///
/// Base tags come first, then the platform pool, capped at [`MAX_HASHTAGS`].
pub fn hashtags_for(platform: Option<Platform>) -> Vec<String> {
    let mut tags: Vec<String> = BASE_HASHTAGS.iter().map(|t| t.to_string()).collect();
    if let Some(platform) = platform {
        tags.extend(platform.hashtags().iter().map(|t| t.to_string()));
    }
    tags.truncate(MAX_HASHTAGS);
    tags
}

/// Badges shown next to an exported clip. Platform-less exports are
/// labelled "Custom".
pub fn badges_for(platform: Option<Platform>) -> Vec<String> {
    match platform {
        Some(platform) => vec![platform.as_str().to_string()],
        None => vec!["Custom".to_string()],
    }
}

/// Platform tag stored on exported clip records; "generic" when the
/// export had no target platform.
pub fn platform_tag(platform: Option<Platform>) -> String {
    platform
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "generic".to_string())
}

/// Output aspect ratio, e.g. 9:16 for vertical short-form video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Vertical 9:16, the short-form default.
    pub const PORTRAIT: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    /// Square 1:1, used by feed-oriented platforms.
    pub const SQUARE: AspectRatio = AspectRatio {
        width: 1,
        height: 1,
    };

    pub fn as_f64(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}
