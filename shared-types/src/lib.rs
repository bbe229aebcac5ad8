use serde::{Deserialize, Serialize};

pub mod dashboard;
pub mod invoice;
pub mod notification;
pub mod project;
pub mod revenue;

pub use dashboard::{DashboardSummary, StatusCount};
pub use invoice::{Invoice, InvoiceStatus, InvoicesResponse};
pub use notification::{Notification, NotificationSeverity, NotificationsResponse};
pub use project::{Project, ProjectStatus, ProjectsResponse, UpdateProgressRequest};
pub use revenue::{RevenuePoint, RevenueResponse};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
