//! Title pool for generated candidates.

/// Suggested titles assigned to detected highlights.
///
/// Detection avoids handing out the same title twice until the pool is
/// exhausted, so sources with up to twelve candidates get unique titles.
pub const TITLE_POOL: [&str; 12] = [
    "The Big Reveal Moment",
    "Unexpected Plot Twist",
    "Viral-Worthy Reaction",
    "Key Insight Highlight",
    "Emotional Peak",
    "Hilarious Moment",
    "Expert Tip Segment",
    "Behind The Scenes",
    "Hot Take Alert",
    "Must-See Moment",
    "Game-Changing Advice",
    "Shocking Discovery",
];
