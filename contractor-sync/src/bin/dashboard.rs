use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{Config, File};
use serde::Deserialize;
use shared_types::{InvoiceStatus, ProjectStatus};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use contractor_sync::paths;
use contractor_sync::refresh::DEFAULT_REFRESH_INTERVAL;
use contractor_sync::{
    DashboardSnapshot, DataStore, HttpSyncApi, MockSyncApi, PendingWrite, ProgressController,
    RefreshDriver, SimulatedEventSource, SyncApi, ViewState,
};

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Contractor dashboard in the terminal")]
struct Cli {
    /// Base URL of a running contractor-api; the in-process mock store is used when omitted
    #[arg(long)]
    server: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary cards and project counts by status
    Summary,
    /// Projects table
    Projects {
        /// Case-insensitive match on project name or client
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_parser = parse_project_status)]
        status: Option<ProjectStatus>,
    },
    /// Invoices table
    Invoices {
        #[arg(long, value_parser = parse_invoice_status)]
        status: Option<InvoiceStatus>,
    },
    /// Latest notifications
    Notifications {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Nudge a project's progress by a percentage
    Bump {
        id: i64,
        #[arg(long, default_value_t = 10, allow_hyphen_values = true)]
        by: i32,
    },
    /// Mark a project as complete
    Complete { id: i64 },
    /// Run the live refresh loop for a number of ticks
    Watch {
        #[arg(long, default_value_t = 3)]
        ticks: u32,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Deserialize, Clone, Default)]
struct DashboardConfig {
    mock: Option<MockConfig>,
    refresh: Option<RefreshConfig>,
    client: Option<ClientConfig>,
}

#[derive(Debug, Deserialize, Clone)]
struct MockConfig {
    latency_ms: u64,
    failure_rate: f64,
}

#[derive(Debug, Deserialize, Clone)]
struct RefreshConfig {
    interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
struct ClientConfig {
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_dashboard_config(cli.config.clone())?;
    let api = build_api(&cli, &config)?;

    let view = Arc::new(
        ViewState::load(api.as_ref())
            .await
            .context("Failed to load dashboard data")?,
    );

    match cli.command {
        Command::Summary => print_summary(&view.snapshot().await),
        Command::Projects { search, status } => {
            let snapshot = view.snapshot().await;
            let projects = snapshot.filter_projects(&search, status);
            if projects.is_empty() {
                println!("No projects match");
            }
            for project in projects {
                println!(
                    "#{:<3} {:<28} {:<20} {:<12} {:>3}%  ${:>10.2}  due {}",
                    project.id,
                    project.name,
                    project.client,
                    project.status.label(),
                    project.progress,
                    project.budget,
                    project.due_date
                );
            }
        }
        Command::Invoices { status } => {
            let snapshot = view.snapshot().await;
            for invoice in snapshot.filter_invoices(status) {
                println!(
                    "#{:<5} {:<28} ${:>10.2}  {:<8} issued {}",
                    invoice.id,
                    snapshot.invoice_project_label(invoice),
                    invoice.amount,
                    invoice.status.label(),
                    invoice.issued_on
                );
            }
        }
        Command::Notifications { limit } => {
            let snapshot = view.snapshot().await;
            for notification in snapshot.recent_notifications(limit) {
                println!(
                    "[{:?}] {} ({})",
                    notification.severity,
                    notification.message,
                    notification.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Command::Bump { id, by } => {
            let controller = ProgressController::spawn(api.clone(), view.clone());
            let pending = controller.adjust_progress(id, by).await;
            report_write(&controller, pending).await;
        }
        Command::Complete { id } => {
            let controller = ProgressController::spawn(api.clone(), view.clone());
            let pending = controller.complete(id).await;
            report_write(&controller, pending).await;
        }
        Command::Watch { ticks, seed } => {
            let source = match seed {
                Some(seed) => SimulatedEventSource::seeded(seed),
                None => SimulatedEventSource::new(),
            };
            let period = config
                .refresh
                .as_ref()
                .map(|r| Duration::from_secs(r.interval_secs))
                .unwrap_or(DEFAULT_REFRESH_INTERVAL);

            let driver = RefreshDriver::new(view.clone(), Box::new(source), period);
            let refresh = driver.spawn();

            // Reports fall halfway between driver ticks
            let start = tokio::time::Instant::now() + period + period / 2;
            let mut report = tokio::time::interval_at(start, period);

            for n in 1..=ticks {
                report.tick().await;
                println!("-- tick {n}");
                print_summary(&view.snapshot().await);
            }

            refresh.stop().await;
        }
    }

    Ok(())
}

async fn report_write(controller: &ProgressController, pending: PendingWrite) {
    let id = pending.project_id();
    let shown = controller.view().project(id).await;
    if let Some(project) = &shown {
        println!(
            "Showing {} at {}% ({})",
            project.name,
            project.progress,
            project.status.label()
        );
    }

    match pending.confirmed().await {
        Ok(project) => println!(
            "Saved {} at {}% ({})",
            project.name,
            project.progress,
            project.status.label()
        ),
        Err(e) => {
            println!("Not saved: {e}");
            if let Some(issue) = controller.view().last_issue().await {
                println!("Dashboard reverted to server data: {}", issue.message);
            }
        }
    }
}

fn print_summary(snapshot: &DashboardSnapshot) {
    let summary = snapshot.summary();
    println!(
        "Projects:     {} total, {} active, {} completed",
        summary.total_projects, summary.active_projects, summary.completed_projects
    );
    println!("Budget:       ${:.2}", summary.total_budget);
    println!(
        "Outstanding:  ${:.2} ({} overdue)",
        summary.outstanding_amount, summary.overdue_invoices
    );
    println!("Revenue:      ${:.2}", summary.total_revenue);

    let counts: Vec<String> = snapshot
        .status_counts()
        .iter()
        .map(|c| format!("{}: {}", c.status.label(), c.count))
        .collect();
    println!("By status:    {}", counts.join(", "));
}

fn build_api(cli: &Cli, config: &DashboardConfig) -> Result<Arc<dyn SyncApi>> {
    if let Some(server) = &cli.server {
        let timeout = config
            .client
            .as_ref()
            .map(|c| Duration::from_secs(c.timeout_secs))
            .unwrap_or(Duration::from_secs(10));
        let api = HttpSyncApi::new(server, timeout)
            .with_context(|| format!("Failed to create HTTP client for {server}"))?;
        tracing::info!("Using contractor-api at {}", server);
        return Ok(Arc::new(api));
    }

    let mut api = MockSyncApi::new(Arc::new(DataStore::seeded()));
    if let Some(mock) = &config.mock {
        api = api
            .with_latency(Duration::from_millis(mock.latency_ms))
            .with_failure_rate(mock.failure_rate);
    }
    tracing::info!("Using in-process mock store");
    Ok(Arc::new(api))
}

fn parse_project_status(value: &str) -> Result<ProjectStatus, String> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase())).map_err(|_| {
        format!("unknown project status '{value}' (pending, in-progress, completed, on-hold)")
    })
}

fn parse_invoice_status(value: &str) -> Result<InvoiceStatus, String> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|_| format!("unknown invoice status '{value}' (pending, paid, overdue)"))
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}

/// Reads the sections this tool cares about from the API config; missing file means defaults
fn load_dashboard_config(path: Option<PathBuf>) -> Result<DashboardConfig> {
    let config_path = path.unwrap_or_else(paths::config_path);
    if !config_path.exists() {
        tracing::debug!("No config at {:?}, using defaults", config_path);
        return Ok(DashboardConfig::default());
    }

    let builder = Config::builder()
        .add_source(File::from(config_path.clone()))
        .build()
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    let config: DashboardConfig = builder.try_deserialize()?;
    Ok(config)
}
