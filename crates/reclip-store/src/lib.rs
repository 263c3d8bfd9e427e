//! Persistence for the Reclip pipeline.
//!
//! This crate provides:
//! - A pluggable key/value [`StorageBackend`] port with in-memory and
//!   on-disk implementations
//! - Typed stores for export records, projects, settings, and stats
//! - The first-run onboarding flag
//! - Storage usage accounting
//!
//! Stores load leniently (a corrupt payload degrades to empty data with
//! a warning) and persist by rewriting the whole value under their key.

pub mod backend;
pub mod error;
pub mod exports;
pub mod file;
pub mod projects;
pub mod settings;
pub mod stats;
pub mod usage;

pub use backend::{MemoryBackend, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use exports::{ExportStore, EXPORTS_KEY};
pub use file::FileBackend;
pub use projects::{ProjectStore, PROJECTS_KEY};
pub use settings::{SettingsStore, ONBOARDING_KEY, SETTINGS_KEY};
pub use stats::{generate_weekly_activity, StatsStore, STATS_KEY};
pub use usage::{storage_used_mb, RECLIP_KEYS};
