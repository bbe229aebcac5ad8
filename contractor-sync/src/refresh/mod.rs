pub mod source;

pub use source::{EventSource, LiveUpdate, SimulatedEventSource};

use crate::error::SyncError;
use crate::view::ViewState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Fixed-interval loop feeding an [`EventSource`] into the view.
///
/// Never contacts the synchronization layer.
pub struct RefreshDriver {
    view: Arc<ViewState>,
    source: Box<dyn EventSource>,
    period: Duration,
}

impl RefreshDriver {
    pub fn new(view: Arc<ViewState>, source: Box<dyn EventSource>, period: Duration) -> Self {
        Self {
            view,
            source,
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// One refresh step; returns the number of updates that took effect
    pub async fn tick(&mut self) -> Result<usize, SyncError> {
        let current = self.view.snapshot().await;
        let updates = self.source.next_batch(&current).await?;
        let applied = self.view.apply_live_updates(&updates).await;

        tracing::debug!(
            "Refresh tick applied {} of {} live updates",
            applied,
            updates.len()
        );
        Ok(applied)
    }

    /// Runs `tick` every period until the returned handle is shut down.
    /// The first tick fires one full period after spawning.
    pub fn spawn(mut self) -> RefreshHandle {
        let shutting_down = Arc::new(AtomicBool::new(false));
        let flag = shutting_down.clone();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if let Err(e) = self.tick().await {
                    tracing::error!("Refresh tick failed: {}", e);
                }
            }

            tracing::info!("Refresh driver stopped");
        });

        RefreshHandle {
            shutting_down,
            handle,
        }
    }
}

pub struct RefreshHandle {
    shutting_down: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// Stops the loop at its next tick
    pub fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
    }

    /// Stops the loop immediately and waits for the task to finish
    pub async fn stop(self) {
        self.shutdown();
        self.handle.abort();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::DashboardSnapshot;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use shared_types::{Project, ProjectStatus};

    fn single_project(progress: u8, status: ProjectStatus) -> DashboardSnapshot {
        DashboardSnapshot {
            projects: vec![Project {
                id: 1,
                name: "Riverside Office Fit-out".to_string(),
                client: "Northwind Holdings".to_string(),
                status,
                progress,
                budget: 185_000.0,
                due_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_tick_advances_in_progress_without_promotion() {
        for seed in 0..20 {
            let view = Arc::new(ViewState::new(single_project(90, ProjectStatus::InProgress)));
            let mut driver = RefreshDriver::new(
                view.clone(),
                Box::new(SimulatedEventSource::seeded(seed)),
                DEFAULT_REFRESH_INTERVAL,
            );

            driver.tick().await.unwrap();

            let project = view.project(1).await.unwrap();
            assert!((90..=93).contains(&project.progress));
            assert_eq!(project.status, ProjectStatus::InProgress);
        }
    }

    #[tokio::test]
    async fn test_tick_at_99_caps_but_keeps_status() {
        struct MaxStep;

        #[async_trait]
        impl EventSource for MaxStep {
            async fn next_batch(
                &mut self,
                current: &DashboardSnapshot,
            ) -> Result<Vec<LiveUpdate>, SyncError> {
                Ok(current
                    .projects
                    .iter()
                    .map(|p| LiveUpdate::ProgressAdvanced {
                        project_id: p.id,
                        amount: 3,
                    })
                    .collect())
            }
        }

        let view = Arc::new(ViewState::new(single_project(99, ProjectStatus::InProgress)));
        let mut driver = RefreshDriver::new(view.clone(), Box::new(MaxStep), DEFAULT_REFRESH_INTERVAL);

        assert_eq!(driver.tick().await.unwrap(), 1);

        let project = view.project(1).await.unwrap();
        assert_eq!(project.progress, 100);
        assert_eq!(project.status, ProjectStatus::InProgress);
    }

    #[tokio::test]
    async fn test_tick_leaves_other_statuses_alone() {
        let view = Arc::new(ViewState::new(single_project(50, ProjectStatus::OnHold)));
        let mut driver = RefreshDriver::new(
            view.clone(),
            Box::new(SimulatedEventSource::seeded(1)),
            DEFAULT_REFRESH_INTERVAL,
        );

        for _ in 0..5 {
            assert_eq!(driver.tick().await.unwrap(), 0);
        }
        assert_eq!(view.project(1).await.unwrap().progress, 50);
    }

    #[tokio::test]
    async fn test_spawned_driver_ticks_and_stops() {
        let view = Arc::new(ViewState::new(crate::seed::seed_snapshot()));
        let before = view.snapshot().await.revenue;

        let handle = RefreshDriver::new(
            view.clone(),
            Box::new(SimulatedEventSource::seeded(9)),
            Duration::from_millis(10),
        )
        .spawn();

        tokio::time::sleep(Duration::from_millis(80)).await;
        handle.stop().await;

        let after = view.snapshot().await.revenue;
        assert_ne!(before, after);
    }
}
