//! Optimistic progress updates.
//!
//! The view is rewritten before the write is confirmed. Writes are handed to a
//! single writer task, so writes to the same project land in the order they
//! were issued. When a write fails, the whole project list is re-fetched and
//! replaces the view. Unconfirmed optimistic edits to other projects are lost
//! by that re-fetch until their own writes land.

use crate::error::SyncError;
use crate::sync::SyncApi;
use crate::view::ViewState;
use shared_types::Project;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

pub const MIN_PROGRESS: i32 = 0;
pub const MAX_PROGRESS: i32 = 100;

/// Caller-side clamp applied before any value reaches the write operation
pub fn clamp_progress(value: i32) -> u8 {
    value.clamp(MIN_PROGRESS, MAX_PROGRESS) as u8
}

struct WriteCommand {
    project_id: i64,
    progress: u8,
    reply: oneshot::Sender<Result<Project, SyncError>>,
}

/// Outcome of a queued write.
///
/// Resolves once the write has landed and, on failure, after the view has been reconciled.
pub struct PendingWrite {
    project_id: i64,
    progress: u8,
    reply: oneshot::Receiver<Result<Project, SyncError>>,
}

impl PendingWrite {
    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    /// Clamped value that was sent to the synchronization layer
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub async fn confirmed(self) -> Result<Project, SyncError> {
        self.reply
            .await
            .unwrap_or_else(|_| Err(SyncError::Transport("write was dropped".to_string())))
    }
}

pub struct ProgressController {
    view: Arc<ViewState>,
    writes: mpsc::UnboundedSender<WriteCommand>,
}

impl ProgressController {
    /// Starts the writer task.
    ///
    /// Dropping the controller closes the queue; writes already issued still
    /// land, and the task exits once the queue is drained.
    pub fn spawn(api: Arc<dyn SyncApi>, view: Arc<ViewState>) -> Self {
        let (writes, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(api, view.clone(), rx));

        Self { view, writes }
    }

    pub fn view(&self) -> Arc<ViewState> {
        self.view.clone()
    }

    /// Shows `value` (clamped to 0..=100) immediately, then queues the write
    pub async fn set_progress(&self, project_id: i64, value: i32) -> PendingWrite {
        let progress = clamp_progress(value);

        if !self.view.apply_optimistic_progress(project_id, progress).await {
            tracing::warn!(
                "Project {} is not in the view; sending write anyway",
                project_id
            );
        }

        let (reply, rx) = oneshot::channel();
        let command = WriteCommand {
            project_id,
            progress,
            reply,
        };

        if let Err(mpsc::error::SendError(command)) = self.writes.send(command) {
            tracing::error!("Write queue closed; project {} not saved", project_id);
            let _ = command
                .reply
                .send(Err(SyncError::Transport("write queue closed".to_string())));
        }

        PendingWrite {
            project_id,
            progress,
            reply: rx,
        }
    }

    /// "+10%" style nudge relative to what the view currently shows
    pub async fn adjust_progress(&self, project_id: i64, delta: i32) -> PendingWrite {
        let current = self
            .view
            .project(project_id)
            .await
            .map(|p| i32::from(p.progress))
            .unwrap_or(0);

        self.set_progress(project_id, current + delta).await
    }

    pub async fn complete(&self, project_id: i64) -> PendingWrite {
        self.set_progress(project_id, MAX_PROGRESS).await
    }
}

async fn run_writer(
    api: Arc<dyn SyncApi>,
    view: Arc<ViewState>,
    mut rx: mpsc::UnboundedReceiver<WriteCommand>,
) {
    while let Some(command) = rx.recv().await {
        let result = api
            .update_project_progress(command.project_id, command.progress)
            .await;

        match &result {
            Ok(project) => {
                tracing::debug!(
                    "Confirmed progress {} for project {}",
                    project.progress,
                    project.id
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Progress write for project {} failed, reconciling: {}",
                    command.project_id,
                    e
                );
                reconcile(api.as_ref(), &view, e).await;
            }
        }

        let _ = command.reply.send(result);
    }
}

/// Drops every speculative project edit in favour of the store's current state
async fn reconcile(api: &dyn SyncApi, view: &ViewState, cause: &SyncError) {
    match api.fetch_projects().await {
        Ok(projects) => {
            view.replace_projects(projects).await;
            tracing::info!("View projects replaced after failed write");
        }
        Err(e) => {
            tracing::error!("Re-fetch after failed write also failed: {}", e);
        }
    }

    view.record_issue(format!("Could not save progress: {cause}")).await;
}
