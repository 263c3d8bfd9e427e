//! Storage usage accounting for the dashboard.

use crate::backend::StorageBackend;
use crate::exports::EXPORTS_KEY;
use crate::projects::PROJECTS_KEY;
use crate::settings::{ONBOARDING_KEY, SETTINGS_KEY};
use crate::stats::STATS_KEY;

/// Every key the app persists, for usage sweeps and full resets.
pub const RECLIP_KEYS: [&str; 5] = [
    EXPORTS_KEY,
    PROJECTS_KEY,
    SETTINGS_KEY,
    STATS_KEY,
    ONBOARDING_KEY,
];

/// Total size of all persisted payloads in megabytes.
///
/// Unreadable keys count as zero; this figure is cosmetic and must not
/// fail the dashboard.
pub async fn storage_used_mb(backend: &dyn StorageBackend) -> f64 {
    let mut total = 0usize;
    for key in RECLIP_KEYS {
        if let Ok(Some(value)) = backend.get(key).await {
            total += value.len();
        }
    }
    total as f64 / (1024.0 * 1024.0)
}
