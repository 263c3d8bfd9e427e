//! Export pipeline driver.
//!
//! This crate provides:
//! - The single-concurrency driver turning queued jobs into finished
//!   export records
//! - Simulated render timing with per-tick progress
//! - Fabricated output artifacts (file sizes, download URLs)
//! - A demo binary wiring detection, queueing, and storage together

pub mod artifact;
pub mod config;
pub mod driver;

pub use artifact::{download_url, fabricate_file_size, DOWNLOAD_BASE_URL};
pub use config::PipelineConfig;
pub use driver::PipelineDriver;
