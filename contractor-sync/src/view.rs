use crate::error::SyncError;
use crate::refresh::LiveUpdate;
use crate::snapshot::DashboardSnapshot;
use crate::store::apply_progress;
use crate::sync::{load_snapshot, SyncApi};
use chrono::{DateTime, Utc};
use shared_types::{Project, ProjectStatus};
use tokio::sync::RwLock;

/// Last write that failed and was rolled back by a re-fetch, kept for display
#[derive(Debug, Clone, PartialEq)]
pub struct SyncIssue {
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct ViewInner {
    data: DashboardSnapshot,
    issue: Option<SyncIssue>,
}

/// Client-held copy of the dashboard.
///
/// May run ahead of the backing store while an optimistic write is in flight.
/// No mutation holds the lock across an await point.
#[derive(Debug, Default)]
pub struct ViewState {
    inner: RwLock<ViewInner>,
}

impl ViewState {
    pub fn new(data: DashboardSnapshot) -> Self {
        Self {
            inner: RwLock::new(ViewInner { data, issue: None }),
        }
    }

    /// Seeds the view from the synchronization layer. Read failures are returned as-is.
    pub async fn load(api: &dyn SyncApi) -> Result<Self, SyncError> {
        let data = load_snapshot(api).await?;
        Ok(Self::new(data))
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.inner.read().await.data.clone()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.inner.read().await.data.projects.clone()
    }

    pub async fn project(&self, id: i64) -> Option<Project> {
        self.inner.read().await.data.project(id).cloned()
    }

    /// Speculative progress change. Returns false when the view has no such project.
    pub async fn apply_optimistic_progress(&self, id: i64, progress: u8) -> bool {
        let mut inner = self.inner.write().await;
        match inner.data.projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                apply_progress(project, progress);
                true
            }
            None => false,
        }
    }

    /// Wholesale replacement with backend-confirmed projects
    pub async fn replace_projects(&self, projects: Vec<Project>) {
        let mut inner = self.inner.write().await;
        inner.data.projects = projects;
    }

    /// Applies pushed changes and returns how many took effect.
    ///
    /// Revenue never goes below zero. Only `In Progress` projects advance, progress
    /// caps at 100, and reaching 100 here does not mark a project `Completed`.
    pub async fn apply_live_updates(&self, updates: &[LiveUpdate]) -> usize {
        let mut inner = self.inner.write().await;
        let mut applied = 0;

        for update in updates {
            match update {
                LiveUpdate::RevenueScaled { index, factor } => {
                    if let Some(point) = inner.data.revenue.get_mut(*index) {
                        point.revenue = (point.revenue * factor).max(0.0);
                        applied += 1;
                    }
                }
                LiveUpdate::ProgressAdvanced { project_id, amount } => {
                    let project = inner
                        .data
                        .projects
                        .iter_mut()
                        .find(|p| p.id == *project_id && p.status == ProjectStatus::InProgress);

                    if let Some(project) = project {
                        project.progress = project.progress.saturating_add(*amount).min(100);
                        applied += 1;
                    }
                }
            }
        }

        applied
    }

    pub async fn record_issue(&self, message: String) {
        let mut inner = self.inner.write().await;
        inner.issue = Some(SyncIssue {
            message,
            occurred_at: Utc::now(),
        });
    }

    pub async fn last_issue(&self) -> Option<SyncIssue> {
        self.inner.read().await.issue.clone()
    }

    /// Dismisses the error indicator, returning what was shown
    pub async fn clear_issue(&self) -> Option<SyncIssue> {
        self.inner.write().await.issue.take()
    }
}
