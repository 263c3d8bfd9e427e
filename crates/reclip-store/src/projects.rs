//! Persisted store of uploaded source-video projects.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use reclip_models::Project;

use crate::backend::StorageBackend;
use crate::error::StorageResult;

/// Storage key holding the project list as one JSON array.
pub const PROJECTS_KEY: &str = "reclip_projects";

/// All projects the user has uploaded, newest first.
///
/// Same durability posture as [`crate::ExportStore`]: loads degrade to
/// an empty list with a warning, mutations rewrite the whole list.
pub struct ProjectStore {
    backend: Arc<dyn StorageBackend>,
    projects: RwLock<Vec<Project>>,
}

impl ProjectStore {
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Self {
        let projects = match backend.get(PROJECTS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Project>>(&raw) {
                Ok(projects) => {
                    debug!(count = projects.len(), "Loaded projects");
                    projects
                }
                Err(e) => {
                    warn!(error = %e, "Corrupt project list, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read project list, starting empty");
                Vec::new()
            }
        };

        Self {
            backend,
            projects: RwLock::new(projects),
        }
    }

    /// Adds a project to the front of the list and hands it back.
    pub async fn add(&self, project: Project) -> StorageResult<Project> {
        let mut projects = self.projects.write().await;
        projects.insert(0, project.clone());
        self.persist(&projects).await?;
        Ok(project)
    }

    /// Replaces the stored project with the same id.
    ///
    /// Returns `false` when no project with that id exists; nothing is
    /// written in that case.
    pub async fn update(&self, project: Project) -> StorageResult<bool> {
        let mut projects = self.projects.write().await;
        let Some(slot) = projects.iter_mut().find(|p| p.id == project.id) else {
            return Ok(false);
        };
        *slot = project;
        self.persist(&projects).await?;
        Ok(true)
    }

    /// Deletes the project with the given id, if present.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        let mut projects = self.projects.write().await;
        projects.retain(|p| p.id != id);
        self.persist(&projects).await
    }

    /// All projects, newest first.
    pub async fn projects(&self) -> Vec<Project> {
        self.projects.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Project> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }

    async fn persist(&self, projects: &[Project]) -> StorageResult<()> {
        let raw = serde_json::to_string(projects)?;
        self.backend.set(PROJECTS_KEY, &raw).await
    }
}
