//! End-to-end export pipeline tests.
//!
//! Timers run under tokio's paused clock, so simulated renders finish as
//! fast as the scheduler can advance virtual time.

use std::sync::Arc;
use std::time::Duration;

use reclip_models::{ClipCandidate, ExportConfig, ExportStatus, Platform, CANCELLED_BY_USER};
use reclip_pipeline::{PipelineConfig, PipelineDriver};
use reclip_queue::{ExportQueue, QueueEvent};
use reclip_store::{
    ExportStore, FileBackend, MemoryBackend, StorageBackend, StorageError, StorageResult,
};

fn candidate(id: &str) -> ClipCandidate {
    ClipCandidate {
        id: id.to_string(),
        start_time: 30.0,
        end_time: 65.0,
        title: format!("Highlight {}", id),
        score: 85,
        selected: true,
        thumbnail: None,
    }
}

async fn memory_store() -> Arc<ExportStore> {
    Arc::new(ExportStore::open(Arc::new(MemoryBackend::new())).await)
}

fn driver_for(queue: &Arc<ExportQueue>, exports: &Arc<ExportStore>) -> PipelineDriver {
    PipelineDriver::new(PipelineConfig::default(), queue.clone(), exports.clone())
}

/// Every queued job completes, and completion follows submission order.
#[tokio::test(start_paused = true)]
async fn test_jobs_complete_in_fifo_order() {
    let queue = Arc::new(ExportQueue::new());
    let exports = memory_store().await;
    let driver = driver_for(&queue, &exports);

    let jobs = queue
        .enqueue(
            &[candidate("clip-1"), candidate("clip-2"), candidate("clip-3")],
            ExportConfig::default(),
        )
        .await
        .expect("enqueue failed");

    driver.run_until_idle().await;

    assert!(queue.all_complete().await);
    let stats = queue.stats().await;
    assert_eq!(stats.complete, 3);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.overall_percent, 100);

    // The store prepends, so the newest record is the last job finished.
    let records = exports.records().await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].id, jobs[2].id.as_str());
    assert_eq!(records[1].id, jobs[1].id.as_str());
    assert_eq!(records[2].id, jobs[0].id.as_str());
}

/// At most one job is ever in flight: every start is bracketed by the
/// previous job's terminal event.
#[tokio::test(start_paused = true)]
async fn test_single_job_in_flight() {
    let queue = Arc::new(ExportQueue::with_event_capacity(2048));
    let exports = memory_store().await;
    let driver = driver_for(&queue, &exports);
    let mut rx = queue.subscribe();

    queue
        .enqueue(
            &[candidate("clip-1"), candidate("clip-2"), candidate("clip-3")],
            ExportConfig::default(),
        )
        .await
        .expect("enqueue failed");

    driver.run_until_idle().await;

    let mut in_flight = 0i32;
    let mut max_in_flight = 0i32;
    while let Ok(event) = rx.try_recv() {
        match event {
            QueueEvent::Started { .. } => {
                in_flight += 1;
                max_in_flight = max_in_flight.max(in_flight);
            }
            QueueEvent::Completed { .. } | QueueEvent::Failed { .. } => in_flight -= 1,
            _ => {}
        }
    }
    assert_eq!(max_in_flight, 1);
    assert_eq!(in_flight, 0);
}

/// Cancelling the in-flight job sticks: the render result is discarded,
/// the job stays failed, and no record reaches the library.
#[tokio::test(start_paused = true)]
async fn test_cancel_during_processing_stays_failed() {
    let queue = Arc::new(ExportQueue::new());
    let exports = memory_store().await;
    let driver = Arc::new(driver_for(&queue, &exports));

    let jobs = queue
        .enqueue(&[candidate("clip-1")], ExportConfig::default())
        .await
        .expect("enqueue failed");
    let id = jobs[0].id.clone();

    let worker = {
        let driver = driver.clone();
        tokio::spawn(async move { driver.run_until_idle().await })
    };

    // Let the render start and make some progress before cancelling.
    tokio::time::sleep(Duration::from_millis(350)).await;
    let mid = queue.job(&id).await.expect("job missing");
    assert_eq!(mid.status, ExportStatus::Processing);
    assert!(queue.cancel(&id).await);

    worker.await.expect("driver task panicked");

    let final_job = queue.job(&id).await.expect("job missing");
    assert_eq!(final_job.status, ExportStatus::Failed);
    assert_eq!(final_job.error.as_deref(), Some(CANCELLED_BY_USER));
    assert!(final_job.progress < 100);
    assert!(final_job.completed_at.is_none());
    assert!(exports.is_empty().await);
    assert!(queue.completed_records().await.is_empty());
}

/// A queued job cancelled before the driver reaches it fails immediately
/// and is skipped entirely.
#[tokio::test(start_paused = true)]
async fn test_cancel_queued_job_never_processes() {
    let queue = Arc::new(ExportQueue::new());
    let exports = memory_store().await;
    let driver = driver_for(&queue, &exports);

    let jobs = queue
        .enqueue(
            &[candidate("clip-1"), candidate("clip-2")],
            ExportConfig::default(),
        )
        .await
        .expect("enqueue failed");

    assert!(queue.cancel(&jobs[1].id).await);
    let cancelled = queue.job(&jobs[1].id).await.expect("job missing");
    assert_eq!(cancelled.status, ExportStatus::Failed);
    assert_eq!(cancelled.error.as_deref(), Some(CANCELLED_BY_USER));
    assert_eq!(cancelled.progress, 0);

    driver.run_until_idle().await;

    let stats = queue.stats().await;
    assert_eq!(stats.complete, 1);
    assert_eq!(stats.failed, 1);
    let records = exports.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, jobs[0].id.as_str());
}

/// Without a platform the record falls back to the generic tag, the
/// Custom badge, and the four base hashtags.
#[tokio::test(start_paused = true)]
async fn test_custom_export_uses_generic_fallbacks() {
    let queue = Arc::new(ExportQueue::new());
    let exports = memory_store().await;
    let driver = driver_for(&queue, &exports);

    queue
        .enqueue(&[candidate("clip-1")], ExportConfig::default())
        .await
        .expect("enqueue failed");
    driver.run_until_idle().await;

    let records = exports.records().await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.platform, "generic");
    assert_eq!(record.platform_badges, vec!["Custom"]);
    assert_eq!(
        record.hashtags,
        vec!["#viral", "#trending", "#fyp", "#content"]
    );
    assert!(record
        .share_link
        .starts_with("https://share.reclip.app/export-clip-1-"));
    assert!(record.download_url.ends_with(".mp4"));
    assert!(record.file_size.ends_with(" MB"));
}

/// A platform export stamps the record with the platform tag, badge, and
/// hashtag pool.
#[tokio::test(start_paused = true)]
async fn test_platform_export_stamps_platform_metadata() {
    let queue = Arc::new(ExportQueue::new());
    let exports = memory_store().await;
    let driver = driver_for(&queue, &exports);

    queue
        .enqueue(
            &[candidate("clip-1")],
            ExportConfig::for_platform(Platform::Tiktok),
        )
        .await
        .expect("enqueue failed");
    driver.run_until_idle().await;

    let records = exports.records().await;
    let record = &records[0];
    assert_eq!(record.platform, "tiktok");
    assert_eq!(record.platform_badges, vec!["tiktok"]);
    assert_eq!(record.hashtags.len(), 8);
    assert!(record.hashtags.contains(&"#tiktok".to_string()));
    assert!(record.hashtags.contains(&"#viral".to_string()));
}

/// Jobs enqueued while a render is in flight are processed before
/// `run_until_idle` returns.
#[tokio::test(start_paused = true)]
async fn test_late_enqueue_is_drained() {
    let queue = Arc::new(ExportQueue::new());
    let exports = memory_store().await;
    let driver = Arc::new(driver_for(&queue, &exports));

    queue
        .enqueue(&[candidate("clip-1")], ExportConfig::default())
        .await
        .expect("enqueue failed");

    let worker = {
        let driver = driver.clone();
        tokio::spawn(async move { driver.run_until_idle().await })
    };

    tokio::time::sleep(Duration::from_millis(150)).await;
    queue
        .enqueue(&[candidate("clip-2")], ExportConfig::default())
        .await
        .expect("late enqueue failed");

    worker.await.expect("driver task panicked");

    assert!(queue.all_complete().await);
    assert_eq!(exports.len().await, 2);
}

/// The run loop keeps serving jobs until shutdown is requested.
#[tokio::test(start_paused = true)]
async fn test_run_stops_on_shutdown() {
    let queue = Arc::new(ExportQueue::new());
    let exports = memory_store().await;
    let driver = Arc::new(driver_for(&queue, &exports));

    let worker = {
        let driver = driver.clone();
        tokio::spawn(async move { driver.run().await })
    };

    queue
        .enqueue(&[candidate("clip-1")], ExportConfig::default())
        .await
        .expect("enqueue failed");

    while !queue.all_complete().await {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    driver.shutdown();
    worker.await.expect("driver task panicked");

    assert_eq!(exports.len().await, 1);
}

/// Export records survive a restart when backed by files.
#[tokio::test(start_paused = true)]
async fn test_records_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    let before = {
        let backend: Arc<dyn StorageBackend> = Arc::new(FileBackend::new(dir.path()));
        let queue = Arc::new(ExportQueue::new());
        let exports = Arc::new(ExportStore::open(backend).await);
        let driver = driver_for(&queue, &exports);

        queue
            .enqueue(
                &[candidate("clip-1"), candidate("clip-2")],
                ExportConfig::default(),
            )
            .await
            .expect("enqueue failed");
        driver.run_until_idle().await;

        exports.records().await
    };
    assert_eq!(before.len(), 2);

    let backend: Arc<dyn StorageBackend> = Arc::new(FileBackend::new(dir.path()));
    let reopened = ExportStore::open(backend).await;
    let after = reopened.records().await;

    // Ids, titles, and export dates all round trip through the files.
    assert_eq!(after, before);
}

struct FailingBackend;

#[async_trait::async_trait]
impl StorageBackend for FailingBackend {
    async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::backend("write refused"))
    }

    async fn remove(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

/// A storage failure while persisting a record neither fails the job nor
/// stops later jobs.
#[tokio::test(start_paused = true)]
async fn test_store_failure_does_not_stop_the_pipeline() {
    let queue = Arc::new(ExportQueue::new());
    let exports = Arc::new(ExportStore::open(Arc::new(FailingBackend)).await);
    let driver = driver_for(&queue, &exports);

    queue
        .enqueue(
            &[candidate("clip-1"), candidate("clip-2")],
            ExportConfig::default(),
        )
        .await
        .expect("enqueue failed");
    driver.run_until_idle().await;

    let stats = queue.stats().await;
    assert_eq!(stats.complete, 2);
    assert_eq!(stats.failed, 0);
}
