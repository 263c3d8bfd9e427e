//! Lifetime usage counters backing the dashboard.

use std::sync::Arc;

use rand::Rng;
use tracing::warn;

use reclip_models::{DayActivity, UserStats, WEEK_DAYS};

use crate::backend::StorageBackend;
use crate::error::StorageResult;

/// Storage key holding [`UserStats`] as a JSON object.
pub const STATS_KEY: &str = "reclip_stats";

/// Counters accumulate across sessions; the weekly activity chart does
/// not. Every [`load`](StatsStore::load) fills `weekly_activity` with
/// fresh sample data and [`save`](StatsStore::save) strips it back out,
/// so only the counters ever reach the backend.
pub struct StatsStore {
    backend: Arc<dyn StorageBackend>,
}

impl StatsStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Loads the counters and regenerates the weekly activity chart.
    pub async fn load(&self) -> UserStats {
        let mut stats = match self.backend.get(STATS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(stats) => stats,
                Err(e) => {
                    warn!(error = %e, "Corrupt stats, resetting counters");
                    UserStats::default()
                }
            },
            Ok(None) => UserStats::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read stats, resetting counters");
                UserStats::default()
            }
        };
        stats.weekly_activity = generate_weekly_activity();
        stats
    }

    /// Persists the counters, dropping the ephemeral weekly activity.
    pub async fn save(&self, stats: &UserStats) -> StorageResult<()> {
        let mut persisted = stats.clone();
        persisted.weekly_activity.clear();
        let raw = serde_json::to_string(&persisted)?;
        self.backend.set(STATS_KEY, &raw).await
    }

    /// Counts one processed source video and returns the updated stats.
    pub async fn record_video_processed(&self) -> StorageResult<UserStats> {
        let mut stats = self.load().await;
        stats.record_video();
        self.save(&stats).await?;
        Ok(stats)
    }

    /// Counts newly created clips and returns the updated stats.
    pub async fn record_clips_created(&self, count: u64) -> StorageResult<UserStats> {
        let mut stats = self.load().await;
        stats.record_clips(count);
        self.save(&stats).await?;
        Ok(stats)
    }
}

/// Sample activity for the dashboard chart, Monday through Sunday.
pub fn generate_weekly_activity() -> Vec<DayActivity> {
    let mut rng = rand::rng();
    WEEK_DAYS
        .iter()
        .map(|day| DayActivity {
            day: day.to_string(),
            clips: rng.random_range(0..8),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn test_load_fills_weekly_activity() {
        let store = StatsStore::new(Arc::new(MemoryBackend::new()));
        let stats = store.load().await;

        assert_eq!(stats.clips_created, 0);
        assert_eq!(stats.weekly_activity.len(), 7);
        assert_eq!(stats.weekly_activity[0].day, "Mon");
        assert_eq!(stats.weekly_activity[6].day, "Sun");
        assert!(stats.weekly_activity.iter().all(|d| d.clips < 8));
    }

    #[tokio::test]
    async fn test_counters_survive_reload_but_activity_does_not() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let store = StatsStore::new(backend.clone());

        store.record_video_processed().await.unwrap();
        let stats = store.record_clips_created(4).await.unwrap();
        assert_eq!(stats.hours_saved, 1.0);

        // Only the counters are written; the chart is rebuilt per load.
        let raw = backend.get(STATS_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"weeklyActivity\":[]"));

        let reloaded = StatsStore::new(backend).load().await;
        assert_eq!(reloaded.total_videos_processed, 1);
        assert_eq!(reloaded.clips_created, 4);
        assert_eq!(reloaded.weekly_activity.len(), 7);
    }

    #[tokio::test]
    async fn test_corrupt_stats_reset_counters() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(STATS_KEY, "nope").await.unwrap();

        let stats = StatsStore::new(backend).load().await;
        assert_eq!(stats.total_videos_processed, 0);
        assert_eq!(stats.clips_created, 0);
    }
}
