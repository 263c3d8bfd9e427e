//! In-process export job queue.
//!
//! This crate provides:
//! - Batch enqueueing of clip candidates as export jobs
//! - Single-slot claiming with FIFO order
//! - Cooperative cancellation that always wins against completion
//! - Queue snapshots and aggregate stats
//! - Lifecycle events via a broadcast channel

pub mod error;
pub mod events;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use events::{EventChannel, QueueEvent, EVENT_BUFFER};
pub use queue::{ExportQueue, QueueStats};
