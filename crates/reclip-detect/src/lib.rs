//! Simulated highlight detection for Reclip.
//!
//! Stands in for the AI detection service: given a source duration it
//! fabricates plausible clip candidates with randomized spans, titles,
//! and virality scores. Callers only rely on the documented invariants
//! (bounds, ordering, score range), never on exact values.

pub mod generator;
pub mod titles;

pub use generator::{ClipDetector, MAX_CLIP_SECS, MIN_CLIP_SECS};
pub use titles::TITLE_POOL;
