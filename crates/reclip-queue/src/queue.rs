//! In-memory export job queue.

use std::collections::HashSet;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use reclip_models::{ClipCandidate, ExportConfig, ExportJob, ExportStatus, ExportedClipRecord, JobId};

use crate::error::{QueueError, QueueResult};
use crate::events::{EventChannel, QueueEvent};

/// Aggregate queue counters for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub queued: usize,
    pub processing: usize,
    pub complete: usize,
    pub failed: usize,
    /// Mean progress across every job in the queue, 0 when empty.
    pub overall_percent: u8,
}

impl QueueStats {
    pub fn total(&self) -> usize {
        self.queued + self.processing + self.complete + self.failed
    }
}

struct QueueState {
    jobs: Vec<ExportJob>,
    /// The job currently being processed, if any. At most one job is
    /// ever in flight.
    current: Option<JobId>,
}

/// The export queue: jobs in submission order plus a single in-flight slot.
///
/// Consumers mutate jobs only through the operations here, and every
/// operation replaces the affected entry wholesale under the lock, so a
/// snapshot never shows a half-applied transition. The driver side
/// (`claim_next`, `update_progress`, `try_complete`, `release_current`)
/// is written so that cancellation racing a completion always lands on
/// Failed: success commits only while the job is still Processing.
pub struct ExportQueue {
    state: RwLock<QueueState>,
    events: EventChannel,
}

impl ExportQueue {
    pub fn new() -> Self {
        Self::with_event_capacity(crate::events::EVENT_BUFFER)
    }

    /// A queue whose event channel buffers `capacity` events per
    /// subscriber. Useful when a consumer reads the history after the
    /// fact instead of live.
    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(QueueState {
                jobs: Vec::new(),
                current: None,
            }),
            events: EventChannel::new(capacity),
        }
    }

    /// Subscribe to job lifecycle events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<QueueEvent> {
        self.events.subscribe()
    }

    /// Creates one queued job per candidate, in input order.
    ///
    /// The whole selection is validated before any job is created: an
    /// empty selection or a clip id appearing twice rejects the call
    /// without touching the queue.
    pub async fn enqueue(
        &self,
        candidates: &[ClipCandidate],
        config: ExportConfig,
    ) -> QueueResult<Vec<ExportJob>> {
        if candidates.is_empty() {
            return Err(QueueError::EmptySelection);
        }
        let mut seen = HashSet::new();
        for candidate in candidates {
            if !seen.insert(candidate.id.as_str()) {
                return Err(QueueError::DuplicateClip(candidate.id.clone()));
            }
        }

        let jobs: Vec<ExportJob> = candidates
            .iter()
            .map(|candidate| ExportJob::for_candidate(candidate, config.clone()))
            .collect();

        let mut state = self.state.write().await;
        for job in &jobs {
            state.jobs.push(job.clone());
            self.events.queued(&job.id);
        }
        info!("Enqueued {} export jobs", jobs.len());

        Ok(jobs)
    }

    /// Cancels a job that has not finished yet.
    ///
    /// Queued and Processing jobs become Failed with the standard
    /// cancellation reason. Terminal and unknown jobs are left alone;
    /// returns whether a job was actually cancelled. The in-flight slot
    /// is not touched: the driver notices the status change on its next
    /// tick and moves on.
    pub async fn cancel(&self, id: &JobId) -> bool {
        let mut state = self.state.write().await;
        let Some(job) = state.jobs.iter_mut().find(|j| &j.id == id) else {
            return false;
        };
        if !job.is_active() {
            return false;
        }
        *job = job.clone().cancel();
        info!("Cancelled job {}", id);
        self.events.failed(id, reclip_models::CANCELLED_BY_USER);
        true
    }

    /// Drops every Complete and Failed job. Idempotent; returns the
    /// number of jobs removed.
    pub async fn clear_completed(&self) -> usize {
        let mut state = self.state.write().await;
        let before = state.jobs.len();
        state.jobs.retain(|job| job.is_active());
        let removed = before - state.jobs.len();
        if removed > 0 {
            debug!("Cleared {} finished jobs", removed);
        }
        removed
    }

    /// Snapshot of every job in submission order.
    pub async fn jobs(&self) -> Vec<ExportJob> {
        self.state.read().await.jobs.clone()
    }

    /// Snapshot of a single job.
    pub async fn job(&self, id: &JobId) -> Option<ExportJob> {
        self.state
            .read()
            .await
            .jobs
            .iter()
            .find(|j| &j.id == id)
            .cloned()
    }

    /// Aggregate counters plus mean progress across the queue.
    pub async fn stats(&self) -> QueueStats {
        let state = self.state.read().await;
        let mut stats = QueueStats {
            queued: 0,
            processing: 0,
            complete: 0,
            failed: 0,
            overall_percent: 0,
        };
        for job in &state.jobs {
            match job.status {
                ExportStatus::Queued => stats.queued += 1,
                ExportStatus::Processing => stats.processing += 1,
                ExportStatus::Complete => stats.complete += 1,
                ExportStatus::Failed => stats.failed += 1,
            }
        }
        if !state.jobs.is_empty() {
            let sum: u32 = state.jobs.iter().map(|j| j.progress as u32).sum();
            stats.overall_percent = (sum as f64 / state.jobs.len() as f64).round() as u8;
        }
        stats
    }

    /// Whether any job is still queued or processing.
    pub async fn has_active_jobs(&self) -> bool {
        self.state.read().await.jobs.iter().any(|j| j.is_active())
    }

    /// Whether the queue is non-empty and every job has finished.
    pub async fn all_complete(&self) -> bool {
        let state = self.state.read().await;
        !state.jobs.is_empty() && state.jobs.iter().all(|j| j.is_terminal())
    }

    /// Finished-clip records for every successfully completed job.
    pub async fn completed_records(&self) -> Vec<ExportedClipRecord> {
        self.state
            .read()
            .await
            .jobs
            .iter()
            .filter(|j| j.status == ExportStatus::Complete)
            .map(ExportedClipRecord::for_job)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.jobs.is_empty()
    }

    /// Moves the oldest queued job to Processing and marks it in flight.
    ///
    /// Returns `None` when a job is already in flight or nothing is
    /// queued, keeping processing strictly one at a time and FIFO.
    pub async fn claim_next(&self) -> Option<ExportJob> {
        let mut state = self.state.write().await;
        if state.current.is_some() {
            return None;
        }
        let job = state
            .jobs
            .iter_mut()
            .find(|j| j.status == ExportStatus::Queued)?;
        *job = job.clone().start();
        let started = job.clone();
        state.current = Some(started.id.clone());
        debug!("Claimed job {}", started.id);
        self.events.started(&started.id);
        Some(started)
    }

    /// Records a progress tick for an in-flight job.
    ///
    /// Returns `false` once the job is no longer Processing (cancelled
    /// or already finished), which tells the driver to stop simulating.
    pub async fn update_progress(&self, id: &JobId, progress: u8, eta_secs: u64) -> bool {
        let mut state = self.state.write().await;
        let Some(job) = state.jobs.iter_mut().find(|j| &j.id == id) else {
            return false;
        };
        if job.status != ExportStatus::Processing {
            return false;
        }
        *job = job.clone().with_progress(progress, eta_secs);
        let progress = job.progress;
        self.events.progress(id, progress, eta_secs);
        true
    }

    /// Commits a successful export, but only if the job is still
    /// Processing. A job cancelled mid-flight stays Failed and the
    /// success result is discarded; returns the completed snapshot
    /// when the commit happened.
    pub async fn try_complete(
        &self,
        id: &JobId,
        file_size: &str,
        download_url: &str,
    ) -> Option<ExportJob> {
        let mut state = self.state.write().await;
        let Some(job) = state.jobs.iter_mut().find(|j| &j.id == id) else {
            warn!("Completion for unknown job {}", id);
            return None;
        };
        if job.status != ExportStatus::Processing {
            debug!(
                "Discarding completion for job {} in state {}",
                id, job.status
            );
            return None;
        }
        *job = job.clone().complete_with(file_size, download_url);
        let completed = job.clone();
        info!("Completed job {}", id);
        self.events.completed(id);
        Some(completed)
    }

    /// Frees the in-flight slot if `id` holds it.
    pub async fn release_current(&self, id: &JobId) {
        let mut state = self.state.write().await;
        if state.current.as_ref() == Some(id) {
            state.current = None;
        }
    }
}

impl Default for ExportQueue {
    fn default() -> Self {
        Self::new()
    }
}
