/// Failures surfaced by the synchronization layer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("Project not found: {id}")]
    NotFound { id: i64 },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl SyncError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound { .. })
    }
}
