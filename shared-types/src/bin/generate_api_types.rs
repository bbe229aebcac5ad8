use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Project types
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(ProjectStatus::export_to_string()?));
    types.push(clean_type(UpdateProgressRequest::export_to_string()?));
    types.push(clean_type(ProjectsResponse::export_to_string()?));

    // Invoice types
    types.push(clean_type(Invoice::export_to_string()?));
    types.push(clean_type(InvoiceStatus::export_to_string()?));
    types.push(clean_type(InvoicesResponse::export_to_string()?));

    // Notification types
    types.push(clean_type(Notification::export_to_string()?));
    types.push(clean_type(NotificationSeverity::export_to_string()?));
    types.push(clean_type(NotificationsResponse::export_to_string()?));

    // Revenue chart
    types.push(clean_type(RevenuePoint::export_to_string()?));
    types.push(clean_type(RevenueResponse::export_to_string()?));

    // Summary cards
    types.push(clean_type(DashboardSummary::export_to_string()?));
    types.push(clean_type(StatusCount::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
