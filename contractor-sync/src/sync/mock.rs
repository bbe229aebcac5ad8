use super::SyncApi;
use crate::error::SyncError;
use crate::store::DataStore;
use async_trait::async_trait;
use rand::Rng;
use shared_types::{Invoice, Notification, Project, RevenuePoint};
use std::sync::Arc;
use std::time::Duration;

/// Synchronization layer backed by an in-process [`DataStore`].
///
/// Each call waits `latency` before touching the store and fails with a
/// transport error at `failure_rate` (0.0 never, 1.0 always).
pub struct MockSyncApi {
    store: Arc<DataStore>,
    latency: Duration,
    failure_rate: f64,
}

impl MockSyncApi {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
            failure_rate: 0.0,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate.clamp(0.0, 1.0);
        self
    }

    pub fn store(&self) -> Arc<DataStore> {
        self.store.clone()
    }

    async fn round_trip(&self, operation: &str) -> Result<(), SyncError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let failed = self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate);
        if failed {
            tracing::warn!("Simulated transport failure during {}", operation);
            return Err(SyncError::Transport(format!(
                "simulated failure during {operation}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SyncApi for MockSyncApi {
    async fn fetch_projects(&self) -> Result<Vec<Project>, SyncError> {
        self.round_trip("fetch_projects").await?;
        Ok(self.store.projects().await)
    }

    async fn fetch_invoices(&self) -> Result<Vec<Invoice>, SyncError> {
        self.round_trip("fetch_invoices").await?;
        Ok(self.store.invoices().await)
    }

    async fn fetch_notifications(&self) -> Result<Vec<Notification>, SyncError> {
        self.round_trip("fetch_notifications").await?;
        Ok(self.store.notifications().await)
    }

    async fn fetch_revenue(&self) -> Result<Vec<RevenuePoint>, SyncError> {
        self.round_trip("fetch_revenue").await?;
        Ok(self.store.revenue().await)
    }

    async fn update_project_progress(&self, id: i64, progress: u8) -> Result<Project, SyncError> {
        self.round_trip("update_project_progress").await?;
        let project = self.store.update_project_progress(id, progress).await?;
        tracing::debug!(
            "Project {} progress set to {} ({:?})",
            id,
            project.progress,
            project.status
        );
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::load_snapshot;
    use shared_types::ProjectStatus;

    #[tokio::test]
    async fn test_load_snapshot_from_seeded_store() {
        let api = MockSyncApi::new(Arc::new(DataStore::seeded()));

        let snapshot = load_snapshot(&api).await.unwrap();
        assert_eq!(snapshot.projects.len(), 6);
        assert_eq!(snapshot.invoices.len(), 7);
        assert_eq!(snapshot.notifications.len(), 4);
        assert_eq!(snapshot.revenue.len(), 6);
    }

    #[tokio::test]
    async fn test_update_goes_through_to_store() {
        let store = Arc::new(DataStore::seeded());
        let api = MockSyncApi::new(store.clone());

        let project = api.update_project_progress(6, 100).await.unwrap();
        assert_eq!(project.status, ProjectStatus::Completed);

        let stored = store.projects().await;
        let stored = stored.iter().find(|p| p.id == 6).unwrap();
        assert_eq!(stored.progress, 100);
        assert_eq!(stored.status, ProjectStatus::Completed);
    }

    #[tokio::test]
    async fn test_full_failure_rate_fails_every_call() {
        let api = MockSyncApi::new(Arc::new(DataStore::seeded())).with_failure_rate(1.0);

        assert!(matches!(
            api.fetch_projects().await,
            Err(SyncError::Transport(_))
        ));
        assert!(matches!(
            api.update_project_progress(1, 70).await,
            Err(SyncError::Transport(_))
        ));

        // The failed write never reached the store
        let stored = api.store().projects().await;
        assert_eq!(stored[0].progress, 62);
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let api = MockSyncApi::new(Arc::new(DataStore::seeded()))
            .with_latency(Duration::from_millis(20));

        let started = std::time::Instant::now();
        api.fetch_revenue().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
