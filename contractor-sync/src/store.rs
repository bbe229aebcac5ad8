use crate::error::SyncError;
use crate::seed::seed_snapshot;
use crate::snapshot::DashboardSnapshot;
use shared_types::{Invoice, Notification, Project, ProjectStatus, RevenuePoint};
use tokio::sync::RwLock;

/// Writes `progress` onto the project, promoting it to `Completed` once it reaches 100.
///
/// Status is never moved back out of `Completed` when progress later drops.
pub fn apply_progress(project: &mut Project, progress: u8) {
    project.progress = progress;
    if progress >= 100 {
        project.status = ProjectStatus::Completed;
    }
}

/// In-memory system of record behind the mock synchronization layer.
///
/// Every read hands back an owned copy, so callers cannot reach the stored collections.
pub struct DataStore {
    data: RwLock<DashboardSnapshot>,
}

impl DataStore {
    pub fn new(data: DashboardSnapshot) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_snapshot())
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.data.read().await.projects.clone()
    }

    pub async fn invoices(&self) -> Vec<Invoice> {
        self.data.read().await.invoices.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.data.read().await.notifications.clone()
    }

    pub async fn revenue(&self) -> Vec<RevenuePoint> {
        self.data.read().await.revenue.clone()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.data.read().await.clone()
    }

    /// Stores the value as given; range checks belong to the caller.
    pub async fn update_project_progress(
        &self,
        id: i64,
        progress: u8,
    ) -> Result<Project, SyncError> {
        let mut data = self.data.write().await;
        let project = data
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SyncError::NotFound { id })?;

        apply_progress(project, progress);
        Ok(project.clone())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::seeded()
    }
}
