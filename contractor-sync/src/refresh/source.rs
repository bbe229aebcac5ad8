use crate::error::SyncError;
use crate::snapshot::DashboardSnapshot;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::ProjectStatus;

/// A change pushed into the view without a round trip to the store
#[derive(Debug, Clone, PartialEq)]
pub enum LiveUpdate {
    /// Scales the revenue point at `index`; period labels are not unique keys
    RevenueScaled { index: usize, factor: f64 },
    ProgressAdvanced { project_id: i64, amount: u8 },
}

/// Where the refresh driver gets its updates from.
///
/// Receives the view as it stands so a source can decide what to change.
#[async_trait]
pub trait EventSource: Send {
    async fn next_batch(
        &mut self,
        current: &DashboardSnapshot,
    ) -> Result<Vec<LiveUpdate>, SyncError>;
}

/// Random jitter standing in for a live backend feed
pub struct SimulatedEventSource {
    rng: StdRng,
    revenue_jitter: f64,
    max_progress_step: u8,
}

impl SimulatedEventSource {
    pub const REVENUE_JITTER: f64 = 0.03;
    pub const MAX_PROGRESS_STEP: u8 = 3;

    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence, for tests and demos
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            revenue_jitter: Self::REVENUE_JITTER,
            max_progress_step: Self::MAX_PROGRESS_STEP,
        }
    }
}

impl Default for SimulatedEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSource for SimulatedEventSource {
    async fn next_batch(
        &mut self,
        current: &DashboardSnapshot,
    ) -> Result<Vec<LiveUpdate>, SyncError> {
        let mut updates = Vec::with_capacity(current.revenue.len() + current.projects.len());

        for index in 0..current.revenue.len() {
            let factor = self
                .rng
                .gen_range((1.0 - self.revenue_jitter)..=(1.0 + self.revenue_jitter));
            updates.push(LiveUpdate::RevenueScaled { index, factor });
        }

        for project in current
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
        {
            updates.push(LiveUpdate::ProgressAdvanced {
                project_id: project.id,
                amount: self.rng.gen_range(0..=self.max_progress_step),
            });
        }

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_snapshot;

    #[tokio::test]
    async fn test_batch_covers_revenue_and_in_progress_projects() {
        let snapshot = seed_snapshot();
        let mut source = SimulatedEventSource::seeded(7);

        let updates = source.next_batch(&snapshot).await.unwrap();

        let revenue = updates
            .iter()
            .filter(|u| matches!(u, LiveUpdate::RevenueScaled { .. }))
            .count();
        let progress: Vec<i64> = updates
            .iter()
            .filter_map(|u| match u {
                LiveUpdate::ProgressAdvanced { project_id, .. } => Some(*project_id),
                _ => None,
            })
            .collect();

        assert_eq!(revenue, 6);
        assert_eq!(progress, vec![1, 2, 6]);
    }

    #[tokio::test]
    async fn test_jitter_stays_in_bounds() {
        let snapshot = seed_snapshot();
        let mut source = SimulatedEventSource::seeded(42);

        for _ in 0..50 {
            for update in source.next_batch(&snapshot).await.unwrap() {
                match update {
                    LiveUpdate::RevenueScaled { factor, .. } => {
                        assert!((0.97 - 1e-9..=1.03 + 1e-9).contains(&factor));
                    }
                    LiveUpdate::ProgressAdvanced { amount, .. } => {
                        assert!(amount <= 3);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_seeded_sources_repeat() {
        let snapshot = seed_snapshot();
        let mut a = SimulatedEventSource::seeded(3);
        let mut b = SimulatedEventSource::seeded(3);

        assert_eq!(
            a.next_batch(&snapshot).await.unwrap(),
            b.next_batch(&snapshot).await.unwrap()
        );
    }
}
