//! Export pipeline demo binary.
//!
//! Simulates the full product flow: upload a source video, detect clip
//! candidates, queue the selected ones for export, and drive the queue
//! until every job lands in the clip library.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reclip_detect::ClipDetector;
use reclip_models::{ClipCandidate, ExportConfig, Project};
use reclip_pipeline::{PipelineConfig, PipelineDriver};
use reclip_queue::ExportQueue;
use reclip_store::{
    storage_used_mb, ExportStore, FileBackend, MemoryBackend, ProjectStore, SettingsStore,
    StatsStore, StorageBackend,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("reclip=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting reclip-pipeline");

    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let backend: Arc<dyn StorageBackend> = match &config.data_dir {
        Some(dir) => Arc::new(FileBackend::new(dir)),
        None => Arc::new(MemoryBackend::new()),
    };

    let exports = Arc::new(ExportStore::open(backend.clone()).await);
    let projects = ProjectStore::open(backend.clone()).await;
    let settings = SettingsStore::new(backend.clone());
    let stats = StatsStore::new(backend.clone());

    // Simulated upload: an 18 minute source video.
    let project = projects
        .add(Project::new(
            "Live AMA: Scaling Past 100k Subs",
            "https://cdn.reclip.app/sources/live-ama.mp4",
            1080.0,
        ))
        .await?;
    stats.record_video_processed().await?;

    let candidates = ClipDetector::new().detect(project.duration);
    info!("Detected {} clip candidates", candidates.len());

    // Export the auto-selected highlights, or everything if the detector
    // scored the whole batch low.
    let selected: Vec<ClipCandidate> = {
        let picked: Vec<ClipCandidate> = candidates.iter().filter(|c| c.selected).cloned().collect();
        if picked.is_empty() {
            candidates
        } else {
            picked
        }
    };
    projects.update(project.ready(selected.len() as u32)).await?;

    let user = settings.load().await;
    let export_config = match user.platform_preferences.first() {
        Some(platform) => ExportConfig::for_platform(*platform),
        None => ExportConfig {
            quality: user.default_quality,
            format: user.default_format,
            ..ExportConfig::default()
        },
    };
    info!(
        "Exporting {} clips as {} {} for {}",
        selected.len(),
        export_config.quality.label(),
        export_config.format.label(),
        export_config
            .platform
            .map(|p| p.display_name())
            .unwrap_or("Custom"),
    );

    let queue = Arc::new(ExportQueue::new());
    let jobs = queue.enqueue(&selected, export_config).await?;
    info!("Queued {} export jobs", jobs.len());

    let driver = PipelineDriver::new(config, queue.clone(), exports.clone());
    driver.run_until_idle().await;

    stats.record_clips_created(jobs.len() as u64).await?;

    let queue_stats = queue.stats().await;
    info!(
        "Export run finished: {} complete, {} failed",
        queue_stats.complete, queue_stats.failed
    );
    for record in exports.records().await {
        info!(
            "  {} -> {} ({})",
            record.title, record.download_url, record.file_size
        );
    }
    info!(
        "Storage used: {:.2} MB",
        storage_used_mb(backend.as_ref()).await
    );

    Ok(())
}
