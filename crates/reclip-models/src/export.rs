//! Export configuration: quality, container format, captions, platform.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::Platform;

/// Output quality tier for an export.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    #[default]
    High,
    Medium,
    Low,
}

impl ExportQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportQuality::High => "high",
            ExportQuality::Medium => "medium",
            ExportQuality::Low => "low",
        }
    }

    /// Label shown in quality pickers.
    pub fn label(&self) -> &'static str {
        match self {
            ExportQuality::High => "High (1080p)",
            ExportQuality::Medium => "Medium (720p)",
            ExportQuality::Low => "Low (480p)",
        }
    }

    /// Vertical resolution of the rendered output.
    pub fn resolution(&self) -> &'static str {
        match self {
            ExportQuality::High => "1080p",
            ExportQuality::Medium => "720p",
            ExportQuality::Low => "480p",
        }
    }

    /// Target video bitrate at this tier.
    pub fn bitrate(&self) -> &'static str {
        match self {
            ExportQuality::High => "8Mbps",
            ExportQuality::Medium => "5Mbps",
            ExportQuality::Low => "2.5Mbps",
        }
    }
}

impl fmt::Display for ExportQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportQuality {
    type Err = QualityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(ExportQuality::High),
            "medium" => Ok(ExportQuality::Medium),
            "low" => Ok(ExportQuality::Low),
            _ => Err(QualityParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown export quality: {0}")]
pub struct QualityParseError(String);

/// Container format for the rendered clip.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Mp4,
    Mov,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "mp4",
            ExportFormat::Mov => "mov",
        }
    }

    /// Label shown in format pickers.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "MP4",
            ExportFormat::Mov => "MOV",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "video/mp4",
            ExportFormat::Mov => "video/quicktime",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp4" => Ok(ExportFormat::Mp4),
            "mov" => Ok(ExportFormat::Mov),
            _ => Err(FormatParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown export format: {0}")]
pub struct FormatParseError(String);

/// How captions are delivered with the export, if at all.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionOption {
    /// Captions rendered into the video frames.
    #[default]
    BurnedIn,
    /// Captions delivered as a sidecar subtitle file.
    Srt,
    /// No captions.
    None,
}

impl CaptionOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionOption::BurnedIn => "burned-in",
            CaptionOption::Srt => "srt",
            CaptionOption::None => "none",
        }
    }
}

impl fmt::Display for CaptionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaptionOption {
    type Err = CaptionOptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "burned-in" | "burned_in" => Ok(CaptionOption::BurnedIn),
            "srt" => Ok(CaptionOption::Srt),
            "none" => Ok(CaptionOption::None),
            _ => Err(CaptionOptionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown caption option: {0}")]
pub struct CaptionOptionParseError(String);

/// Full configuration for one export request.
///
/// `platform` is `None` for a custom export; choosing a platform applies
/// its preset on top of whatever was already configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    pub quality: ExportQuality,
    pub format: ExportFormat,
    pub caption_option: CaptionOption,
    pub platform: Option<Platform>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            quality: ExportQuality::High,
            format: ExportFormat::Mp4,
            caption_option: CaptionOption::BurnedIn,
            platform: None,
        }
    }
}

impl ExportConfig {
    /// Default configuration tuned for the given platform.
    pub fn for_platform(platform: Platform) -> Self {
        let mut config = Self::default();
        config.apply_platform_preset(platform);
        config
    }

    /// Switches the target platform and overwrites quality and format
    /// with the platform's recommended settings. Caption choice is kept.
    pub fn apply_platform_preset(&mut self, platform: Platform) {
        let preset = platform.preset();
        self.quality = preset.quality;
        self.format = preset.format;
        self.platform = Some(platform);
    }
}
