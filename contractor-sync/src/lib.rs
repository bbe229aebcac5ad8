//! Client-side synchronization for the contractor dashboard.
//!
//! - `store`: in-memory system of record
//! - `sync`: async facade over the store (`MockSyncApi`) or the HTTP API (`HttpSyncApi`)
//! - `view`: the client's copy of the dashboard, which may run ahead of the store
//! - `optimistic`: progress edits shown immediately and written in the background
//! - `refresh`: timer-driven live updates pushed into the view
//! - `paths`: location of the config file shared with `contractor-api`

pub mod error;
pub mod optimistic;
pub mod paths;
pub mod refresh;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod sync;
pub mod view;

pub use error::SyncError;
pub use optimistic::{clamp_progress, PendingWrite, ProgressController};
pub use refresh::{EventSource, LiveUpdate, RefreshDriver, RefreshHandle, SimulatedEventSource};
pub use snapshot::DashboardSnapshot;
pub use store::DataStore;
pub use sync::{load_snapshot, HttpSyncApi, MockSyncApi, SyncApi};
pub use view::{SyncIssue, ViewState};
