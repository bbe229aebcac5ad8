use crate::project::ProjectStatus;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Figures behind the summary cards at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_budget: f64,
    pub outstanding_amount: f64,
    pub overdue_invoices: usize,
    pub total_revenue: f64,
}

/// Number of projects carrying a given status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: usize,
}
