//! Pipeline driver configuration.

use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Progress tick interval
    pub tick_interval: Duration,
    /// Shortest simulated export
    pub min_export: Duration,
    /// Longest simulated export
    pub max_export: Duration,
    /// Directory for the file backend; in-memory storage when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            min_export: Duration::from_millis(3000),
            max_export: Duration::from_millis(5000),
            data_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            tick_interval: Duration::from_millis(
                std::env::var("RECLIP_TICK_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(100),
            ),
            min_export: Duration::from_millis(
                std::env::var("RECLIP_MIN_EXPORT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3000),
            ),
            max_export: Duration::from_millis(
                std::env::var("RECLIP_MAX_EXPORT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5000),
            ),
            data_dir: std::env::var("RECLIP_DATA_DIR").ok().map(PathBuf::from),
        }
    }

    /// Draws a simulated render duration uniformly between the bounds.
    ///
    /// Falls back to the minimum when the bounds are inverted or equal.
    pub fn sample_export_duration(&self) -> Duration {
        if self.max_export <= self.min_export {
            return self.min_export;
        }
        let span = (self.max_export - self.min_export).as_secs_f64();
        let mut rng = rand::rng();
        self.min_export + Duration::from_secs_f64(rng.random::<f64>() * span)
    }
}
