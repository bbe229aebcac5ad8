//! Point-in-time copy of every dashboard collection, plus the client-side
//! figures derived from it (summary cards, status counts, table filters).

use shared_types::{
    DashboardSummary, Invoice, InvoiceStatus, Notification, Project, ProjectStatus, RevenuePoint,
    StatusCount,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub projects: Vec<Project>,
    pub invoices: Vec<Invoice>,
    pub notifications: Vec<Notification>,
    pub revenue: Vec<RevenuePoint>,
}

impl DashboardSnapshot {
    pub fn project(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Project count for every status, in badge order, including zeros
    pub fn status_counts(&self) -> Vec<StatusCount> {
        ProjectStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: self.projects.iter().filter(|p| p.status == *status).count(),
            })
            .collect()
    }

    pub fn summary(&self) -> DashboardSummary {
        let outstanding: Vec<&Invoice> = self
            .invoices
            .iter()
            .filter(|i| i.status.is_outstanding())
            .collect();

        DashboardSummary {
            total_projects: self.projects.len(),
            active_projects: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::InProgress)
                .count(),
            completed_projects: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count(),
            total_budget: self.projects.iter().map(|p| p.budget).sum(),
            outstanding_amount: outstanding.iter().map(|i| i.amount).sum(),
            overdue_invoices: outstanding
                .iter()
                .filter(|i| i.status == InvoiceStatus::Overdue)
                .count(),
            total_revenue: self.revenue.iter().map(|r| r.revenue).sum(),
        }
    }

    /// Projects table search: case-insensitive match on name or client, optionally narrowed by status.
    /// An empty query matches everything.
    pub fn filter_projects(&self, query: &str, status: Option<ProjectStatus>) -> Vec<&Project> {
        let needle = query.trim().to_lowercase();

        self.projects
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.client.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn filter_invoices(&self, status: Option<InvoiceStatus>) -> Vec<&Invoice> {
        self.invoices
            .iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .collect()
    }

    /// Name shown in the invoice table's project column.
    /// Falls back to the raw identifier when the invoice points at no known project.
    pub fn invoice_project_label(&self, invoice: &Invoice) -> String {
        match self.project(invoice.project_id) {
            Some(project) => project.name.clone(),
            None => invoice.project_id.to_string(),
        }
    }

    pub fn recent_notifications(&self, limit: usize) -> Vec<&Notification> {
        let mut notifications: Vec<&Notification> = self.notifications.iter().collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(limit);
        notifications
    }
}
