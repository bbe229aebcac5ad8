pub mod http;
pub mod mock;

pub use http::HttpSyncApi;
pub use mock::MockSyncApi;

use crate::error::SyncError;
use crate::snapshot::DashboardSnapshot;
use async_trait::async_trait;
use shared_types::{Invoice, Notification, Project, RevenuePoint};

/// Asynchronous facade over the dashboard's backing store.
///
/// Reads return owned snapshots. `update_project_progress` expects a value already
/// clamped to 0..=100, promotes the project to `Completed` at 100 and reports
/// `SyncError::NotFound` for unknown ids.
#[async_trait]
pub trait SyncApi: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<Project>, SyncError>;
    async fn fetch_invoices(&self) -> Result<Vec<Invoice>, SyncError>;
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, SyncError>;
    async fn fetch_revenue(&self) -> Result<Vec<RevenuePoint>, SyncError>;

    async fn update_project_progress(&self, id: i64, progress: u8) -> Result<Project, SyncError>;
}

/// Runs the four reads together and assembles the initial dashboard state
pub async fn load_snapshot(api: &dyn SyncApi) -> Result<DashboardSnapshot, SyncError> {
    let (projects, invoices, notifications, revenue) = tokio::try_join!(
        api.fetch_projects(),
        api.fetch_invoices(),
        api.fetch_notifications(),
        api.fetch_revenue(),
    )?;

    tracing::debug!(
        "Loaded dashboard snapshot: {} projects, {} invoices, {} notifications, {} revenue points",
        projects.len(),
        invoices.len(),
        notifications.len(),
        revenue.len()
    );

    Ok(DashboardSnapshot {
        projects,
        invoices,
        notifications,
        revenue,
    })
}
