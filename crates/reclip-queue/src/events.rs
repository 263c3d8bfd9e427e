//! Queue lifecycle events via a broadcast channel.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use reclip_models::JobId;

/// Events buffered per subscriber before the oldest are dropped.
pub const EVENT_BUFFER: usize = 64;

/// Event published on every job transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    /// Job accepted into the queue
    Queued {
        #[serde(rename = "jobId")]
        job_id: JobId,
    },

    /// Job picked up for processing
    Started {
        #[serde(rename = "jobId")]
        job_id: JobId,
    },

    /// Progress update (0-100) with the remaining-time estimate
    Progress {
        #[serde(rename = "jobId")]
        job_id: JobId,
        progress: u8,
        #[serde(rename = "etaSecs")]
        eta_secs: u64,
    },

    /// Export finished successfully
    Completed {
        #[serde(rename = "jobId")]
        job_id: JobId,
    },

    /// Export failed or was cancelled
    Failed {
        #[serde(rename = "jobId")]
        job_id: JobId,
        error: String,
    },
}

impl QueueEvent {
    /// The job this event concerns.
    pub fn job_id(&self) -> &JobId {
        match self {
            QueueEvent::Queued { job_id }
            | QueueEvent::Started { job_id }
            | QueueEvent::Progress { job_id, .. }
            | QueueEvent::Completed { job_id }
            | QueueEvent::Failed { job_id, .. } => job_id,
        }
    }
}

/// Channel for publishing/subscribing to queue events.
///
/// Backed by a tokio broadcast channel: a slow subscriber loses the
/// oldest events instead of blocking the queue, and publishing with no
/// subscribers is a no-op.
pub struct EventChannel {
    tx: broadcast::Sender<QueueEvent>,
}

impl EventChannel {
    /// Create a channel buffering `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all events from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Dropped silently when nobody is listening.
    pub fn publish(&self, event: QueueEvent) {
        let _ = self.tx.send(event);
    }

    /// Publish a queued notification.
    pub fn queued(&self, job_id: &JobId) {
        self.publish(QueueEvent::Queued {
            job_id: job_id.clone(),
        });
    }

    /// Publish a started notification.
    pub fn started(&self, job_id: &JobId) {
        self.publish(QueueEvent::Started {
            job_id: job_id.clone(),
        });
    }

    /// Publish a progress update.
    pub fn progress(&self, job_id: &JobId, progress: u8, eta_secs: u64) {
        self.publish(QueueEvent::Progress {
            job_id: job_id.clone(),
            progress,
            eta_secs,
        });
    }

    /// Publish a completion notification.
    pub fn completed(&self, job_id: &JobId) {
        self.publish(QueueEvent::Completed {
            job_id: job_id.clone(),
        });
    }

    /// Publish a failure notification.
    pub fn failed(&self, job_id: &JobId, error: impl Into<String>) {
        self.publish(QueueEvent::Failed {
            job_id: job_id.clone(),
            error: error.into(),
        });
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new(EVENT_BUFFER)
    }
}
