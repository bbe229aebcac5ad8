use crate::snapshot::DashboardSnapshot;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use shared_types::{
    Invoice, InvoiceStatus, Notification, NotificationSeverity, Project, ProjectStatus,
    RevenuePoint,
};

/// Mock data the store starts from, with notification times relative to now
pub fn seed_snapshot() -> DashboardSnapshot {
    seed_snapshot_at(Utc::now())
}

pub fn seed_snapshot_at(now: DateTime<Utc>) -> DashboardSnapshot {
    DashboardSnapshot {
        projects: seed_projects(),
        invoices: seed_invoices(),
        notifications: seed_notifications(now),
        revenue: seed_revenue(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn project(
    id: i64,
    name: &str,
    client: &str,
    status: ProjectStatus,
    progress: u8,
    budget: f64,
    due_date: NaiveDate,
) -> Project {
    Project {
        id,
        name: name.to_string(),
        client: client.to_string(),
        status,
        progress,
        budget,
        due_date,
    }
}

fn seed_projects() -> Vec<Project> {
    vec![
        project(
            1,
            "Riverside Office Fit-out",
            "Northwind Holdings",
            ProjectStatus::InProgress,
            62,
            185_000.0,
            date(2026, 11, 30),
        ),
        project(
            2,
            "Maple Street Duplex",
            "Cedar Homes",
            ProjectStatus::InProgress,
            35,
            420_000.0,
            date(2027, 3, 15),
        ),
        project(
            3,
            "Harbor Warehouse Roof",
            "Bayline Logistics",
            ProjectStatus::Completed,
            100,
            96_000.0,
            date(2026, 8, 20),
        ),
        project(
            4,
            "Lakeside Clinic Extension",
            "Lakeside Health",
            ProjectStatus::Pending,
            0,
            310_000.0,
            date(2027, 5, 1),
        ),
        project(
            5,
            "Elm Park Landscaping",
            "City of Elmwood",
            ProjectStatus::OnHold,
            48,
            54_000.0,
            date(2026, 12, 10),
        ),
        project(
            6,
            "Summit Retail Storefront",
            "Summit Brands",
            ProjectStatus::InProgress,
            95,
            72_000.0,
            date(2026, 10, 31),
        ),
    ]
}

fn seed_invoices() -> Vec<Invoice> {
    let invoice = |id, project_id, amount, status, issued_on| Invoice {
        id,
        project_id,
        amount,
        status,
        issued_on,
    };

    vec![
        invoice(1001, 1, 45_000.0, InvoiceStatus::Paid, date(2026, 7, 1)),
        invoice(1002, 1, 38_000.0, InvoiceStatus::Pending, date(2026, 9, 1)),
        invoice(1003, 2, 60_000.0, InvoiceStatus::Overdue, date(2026, 8, 15)),
        invoice(1004, 3, 96_000.0, InvoiceStatus::Paid, date(2026, 8, 25)),
        invoice(1005, 6, 18_000.0, InvoiceStatus::Pending, date(2026, 9, 20)),
        invoice(1006, 5, 12_500.0, InvoiceStatus::Overdue, date(2026, 7, 30)),
        // References a project that was never seeded
        invoice(1007, 99, 7_400.0, InvoiceStatus::Pending, date(2026, 9, 28)),
    ]
}

fn seed_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            message: "Invoice #1003 for Maple Street Duplex is overdue".to_string(),
            created_at: now - Duration::hours(2),
            severity: NotificationSeverity::Warning,
        },
        Notification {
            id: 2,
            message: "Harbor Warehouse Roof marked as completed".to_string(),
            created_at: now - Duration::days(1),
            severity: NotificationSeverity::Info,
        },
        Notification {
            id: 3,
            message: "Payment gateway rejected invoice #1006".to_string(),
            created_at: now - Duration::minutes(30),
            severity: NotificationSeverity::Error,
        },
        Notification {
            id: 4,
            message: "New site inspection scheduled for Riverside Office Fit-out".to_string(),
            created_at: now - Duration::days(3),
            severity: NotificationSeverity::Info,
        },
    ]
}

fn seed_revenue() -> Vec<RevenuePoint> {
    [
        ("May", 48_000.0),
        ("Jun", 52_500.0),
        ("Jul", 61_200.0),
        ("Aug", 58_900.0),
        ("Sep", 67_400.0),
        ("Oct", 71_800.0),
    ]
    .into_iter()
    .map(|(period, revenue)| RevenuePoint {
        period: period.to_string(),
        revenue,
    })
    .collect()
}
