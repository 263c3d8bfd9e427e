//! Clip candidates produced by highlight detection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest span a candidate may be trimmed down to, in seconds.
pub const MIN_TRIM_SPAN_SECS: f64 = 5.0;

/// A highlight span in a source video, either detected or manually marked.
///
/// Candidates are what the review UI shows before anything is exported:
/// a time range, a suggested title, and a virality score. The `selected`
/// flag carries the user's (or the detector's) choice of which candidates
/// move on to the export queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClipCandidate {
    /// Stable identifier, unique within one detection pass.
    pub id: String,
    /// Span start in seconds from the beginning of the source.
    pub start_time: f64,
    /// Span end in seconds from the beginning of the source.
    pub end_time: f64,
    /// Suggested title shown in the review UI.
    pub title: String,
    /// Virality score assigned by detection; 0 for manually marked spans.
    pub score: u8,
    /// Whether the candidate is preselected for export.
    #[serde(default)]
    pub selected: bool,
    /// Optional thumbnail URL captured near the span midpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ClipCandidate {
    /// Creates a manually marked candidate over an explicit timeline range.
    ///
    /// Manual spans carry no detection score and start out selected, since
    /// the user has already expressed intent by marking them.
    pub fn manual(start_time: f64, end_time: f64, title: impl Into<String>) -> Self {
        Self {
            id: format!("clip-{}", Uuid::new_v4()),
            start_time,
            end_time,
            title: title.into(),
            score: 0,
            selected: true,
            thumbnail: None,
        }
    }

    /// Span length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether the span fits inside a source of the given duration.
    ///
    /// A candidate is usable when it starts at or after zero, ends within
    /// the source, and covers at least [`MIN_TRIM_SPAN_SECS`].
    pub fn is_valid_for(&self, source_duration: f64) -> bool {
        self.start_time >= 0.0
            && self.end_time <= source_duration
            && self.duration() >= MIN_TRIM_SPAN_SECS
    }

    /// Moves the span start, clamped so the clip keeps its minimum length
    /// and never begins before the source does.
    pub fn trim_start(&mut self, new_start: f64) {
        self.start_time = new_start.max(0.0).min(self.end_time - MIN_TRIM_SPAN_SECS);
    }

    /// Moves the span end, clamped so the clip keeps its minimum length.
    ///
    /// The upper bound is the caller's concern: the candidate does not know
    /// the source duration, so overruns are caught by [`is_valid_for`].
    ///
    /// [`is_valid_for`]: ClipCandidate::is_valid_for
    pub fn trim_end(&mut self, new_end: f64) {
        self.end_time = new_end.max(self.start_time + MIN_TRIM_SPAN_SECS);
    }
}
