//! Single-concurrency export pipeline driver.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use reclip_models::{ExportJob, ExportedClipRecord};
use reclip_queue::ExportQueue;
use reclip_store::ExportStore;

use crate::artifact;
use crate::config::PipelineConfig;

/// Drives queued export jobs to completion, one at a time.
///
/// Each claimed job gets a simulated render of random length. Progress
/// ticks flow back into the queue every tick interval; once the render
/// time has elapsed the driver commits success and persists the finished
/// record. A job cancelled mid-render is noticed on the next tick and
/// dropped without a record.
///
/// One driver per queue: the queue's in-flight slot assumes a single
/// claimant.
pub struct PipelineDriver {
    config: PipelineConfig,
    queue: Arc<ExportQueue>,
    exports: Arc<ExportStore>,
    shutdown: watch::Sender<bool>,
}

impl PipelineDriver {
    pub fn new(config: PipelineConfig, queue: Arc<ExportQueue>, exports: Arc<ExportStore>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            queue,
            exports,
            shutdown,
        }
    }

    /// Runs until [`shutdown`](Self::shutdown) is called.
    ///
    /// The queue is polled once per tick interval while idle. A shutdown
    /// request lets the in-flight job finish its render first.
    pub async fn run(&self) {
        info!("Starting export pipeline driver");
        let mut shutdown_rx = self.shutdown.subscribe();

        loop {
            if *shutdown_rx.borrow() {
                info!("Shutdown signal received, stopping driver");
                break;
            }
            match self.queue.claim_next().await {
                Some(job) => self.process_job(job).await,
                None => {
                    tokio::select! {
                        _ = shutdown_rx.changed() => {}
                        _ = tokio::time::sleep(self.config.tick_interval) => {}
                    }
                }
            }
        }

        info!("Export pipeline driver stopped");
    }

    /// Signal shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Processes jobs until the queue has no queued work left, then
    /// returns. Jobs enqueued while a render is in flight are picked up
    /// before returning.
    pub async fn run_until_idle(&self) {
        while let Some(job) = self.queue.claim_next().await {
            self.process_job(job).await;
        }
    }

    /// Simulates one export end to end.
    async fn process_job(&self, job: ExportJob) {
        let total = self.config.sample_export_duration();
        info!(
            job_id = %job.id,
            clip = %job.clip_title,
            duration_ms = total.as_millis() as u64,
            "Processing export job"
        );

        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.config.tick_interval);
        loop {
            ticker.tick().await;
            let elapsed = started.elapsed();
            if elapsed >= total {
                break;
            }
            // Progress holds at 99 until the completion write-back.
            let progress =
                ((elapsed.as_secs_f64() / total.as_secs_f64()) * 100.0).round().min(99.0) as u8;
            let eta_secs = (total - elapsed).as_secs_f64().round() as u64;
            if !self.queue.update_progress(&job.id, progress, eta_secs).await {
                info!(job_id = %job.id, "Job no longer processing, dropping simulated render");
                self.queue.release_current(&job.id).await;
                return;
            }
        }

        let file_size = artifact::fabricate_file_size();
        let download_url = artifact::download_url(&job.id, job.config.format);
        match self
            .queue
            .try_complete(&job.id, &file_size, &download_url)
            .await
        {
            Some(completed) => {
                let record = ExportedClipRecord::for_job(&completed);
                // The job already completed; losing the record only costs
                // the library entry, so log and move on.
                if let Err(e) = self.exports.add(record).await {
                    warn!(job_id = %job.id, error = %e, "Failed to persist export record");
                }
            }
            None => {
                debug!(job_id = %job.id, "Completion discarded, job already finished");
            }
        }
        self.queue.release_current(&job.id).await;
    }
}
