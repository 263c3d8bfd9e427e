//! Candidate generation: anchored spans with jitter and synthetic scores.
//!
//! Candidates are spread across the source on evenly spaced anchors, one
//! per candidate, each nudged by up to ±30% of a segment width so runs
//! never look gridded. Spans are 15-60 s. Scores combine a position
//! factor (the middle of a source engages best), a duration factor (the
//! 30-45 s sweet spot for short-form), and random jitter, clamped into
//! [45, 99]. Candidates scoring above 70 come back preselected.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use reclip_models::ClipCandidate;

use crate::titles::TITLE_POOL;

/// Shortest generated span, in seconds.
pub const MIN_CLIP_SECS: f64 = 15.0;

/// Longest generated span, in seconds.
pub const MAX_CLIP_SECS: f64 = 60.0;

/// Fewest candidates produced for any non-empty source.
const MIN_COUNT: usize = 5;

/// Most candidates produced when no explicit count is given.
const MAX_COUNT: usize = 8;

const SCORE_FLOOR: u8 = 45;
const SCORE_CEIL: u8 = 99;

/// Scores above this threshold mark a candidate as preselected.
const SELECT_THRESHOLD: u8 = 70;

/// Simulated AI highlight detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipDetector;

impl ClipDetector {
    pub fn new() -> Self {
        Self
    }

    /// Candidate count for a source of the given length: one per
    /// 30 seconds, held between 5 and 8.
    pub fn default_count(total_duration: f64) -> usize {
        ((total_duration / 30.0).floor() as usize).clamp(MIN_COUNT, MAX_COUNT)
    }

    /// Detects candidates with the duration-scaled default count.
    pub fn detect(&self, total_duration: f64) -> Vec<ClipCandidate> {
        self.detect_with_count(total_duration, Self::default_count(total_duration))
    }

    /// Detects exactly `count` candidates, sorted by start time.
    ///
    /// A non-positive duration (or a zero count) yields an empty list.
    /// Ids are `clip-1..clip-N`, unique within one call; because output
    /// is sorted by start, ids are not necessarily in ascending order.
    pub fn detect_with_count(&self, total_duration: f64, count: usize) -> Vec<ClipCandidate> {
        if total_duration <= 0.0 || count == 0 {
            return Vec::new();
        }

        let mut rng = rand::rng();
        let mut used_titles: HashSet<usize> = HashSet::new();
        let segment = total_duration / (count as f64 + 1.0);
        let mut clips = Vec::with_capacity(count);

        for i in 0..count {
            let anchor = segment * (i as f64 + 1.0);
            let jitter = (rng.random::<f64>() - 0.5) * segment * 0.6;
            // Leave room for a max-length span; short sources collapse to 0.
            let start_time = (anchor + jitter).min(total_duration - MAX_CLIP_SECS).max(0.0);
            let span = rng.random_range(MIN_CLIP_SECS..MAX_CLIP_SECS);
            let end_time = (start_time + span).min(total_duration);

            let title_index = loop {
                let index = rng.random_range(0..TITLE_POOL.len());
                if !used_titles.contains(&index) || used_titles.len() >= TITLE_POOL.len() {
                    break index;
                }
            };
            used_titles.insert(title_index);

            let score = score_span(start_time, end_time, total_duration, &mut rng);

            clips.push(ClipCandidate {
                id: format!("clip-{}", i + 1),
                start_time,
                end_time,
                title: TITLE_POOL[title_index].to_string(),
                score,
                selected: score > SELECT_THRESHOLD,
                thumbnail: None,
            });
        }

        clips.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        debug!(
            count = clips.len(),
            total_duration = total_duration,
            "Generated clip candidates"
        );

        clips
    }
}

/// Synthetic virality score for a span.
fn score_span(start: f64, end: f64, total: f64, rng: &mut impl Rng) -> u8 {
    let position = 1.0 - (start / total - 0.5).abs();
    let span = end - start;
    let duration = if (30.0..=45.0).contains(&span) { 1.0 } else { 0.8 };
    let jitter = 0.7 + rng.random::<f64>() * 0.3;
    let raw = (position * duration * jitter * 100.0).round() as u8;
    raw.clamp(SCORE_FLOOR, SCORE_CEIL)
}
