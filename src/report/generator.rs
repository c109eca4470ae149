//! Markdown and JSON report generation.
//!
//! Generates shareable dashboard reports from a merged snapshot.

use anyhow::Result;

use crate::models::{Dashboard, DashboardMetadata, OverallStats, StatusBucket};

/// Generate a complete Markdown report.
pub fn generate_markdown_report(dashboard: &Dashboard, include_stations: bool) -> String {
    let mut output = String::new();

    output.push_str("# Charging Dashboard\n\n");
    output.push_str(&generate_metadata_section(&dashboard.metadata));
    output.push_str(&generate_overview_section(&dashboard.overall));
    output.push_str(&generate_operators_section(dashboard));

    if include_stations {
        output.push_str(&generate_stations_section(dashboard));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &DashboardMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Snapshot\n\n");
    section.push_str(&format!(
        "- **Fetched:** {}\n",
        metadata.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Stations feed:** {}\n", metadata.stations_url));
    section.push_str(&format!("- **Status feed:** {}\n", metadata.status_url));

    if let Some(ref error) = metadata.stations_error {
        section.push_str(&format!("- **Stations feed error:** {}\n", error));
    }
    if let Some(ref error) = metadata.status_error {
        section.push_str(&format!("- **Status feed error:** {}\n", error));
    }

    section.push('\n');
    section
}

/// Generate the overview section with the overall bucket totals.
fn generate_overview_section(overall: &OverallStats) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str(&format!(
        "| Operators | Stations | {} Available | {} Occupied | {} Out of order | {} Unknown |\n",
        StatusBucket::Available.emoji(),
        StatusBucket::Occupied.emoji(),
        StatusBucket::OutOfOrder.emoji(),
        StatusBucket::Unknown.emoji(),
    ));
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n\n",
        overall.operators,
        overall.total_stations,
        overall.available,
        overall.occupied,
        overall.out_of_order,
        overall.unknown,
    ));

    section
}

/// Generate the per-operator table, largest operators first.
fn generate_operators_section(dashboard: &Dashboard) -> String {
    let mut section = String::new();

    section.push_str("## Operators\n\n");

    if dashboard.operators.is_empty() {
        section.push_str("No operators present in the metadata feed.\n\n");
        return section;
    }

    section.push_str("| Operator | ID | Total | Available | Occupied | Out of order | Unknown |\n");
    section.push_str("|:---|:---|:---:|:---:|:---:|:---:|:---:|\n");

    for summary in &dashboard.operators {
        section.push_str(&format!(
            "| {} | `{}` | {} | {} | {} | {} | {} |\n",
            summary.operator_name,
            summary.operator_id,
            summary.total_stations,
            summary.available,
            summary.occupied,
            summary.out_of_order,
            summary.unknown,
        ));
    }

    section.push('\n');
    section
}

/// Generate the per-station listing for every operator.
fn generate_stations_section(dashboard: &Dashboard) -> String {
    let mut section = String::new();

    section.push_str("## Stations\n\n");

    for summary in &dashboard.operators {
        section.push_str(&format!(
            "### {} ({})\n\n",
            summary.operator_name, summary.operator_id
        ));
        section.push_str("| EvseID | Status |\n");
        section.push_str("|:---|:---|\n");

        for evse_id in &summary.stations {
            let status = summary
                .statuses
                .get(evse_id)
                .map(String::as_str)
                .unwrap_or("unknown");
            section.push_str(&format!("| `{}` | {} |\n", evse_id, status));
        }

        section.push('\n');
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by chargewatch*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OperatorSummary, StatusBucket};
    use chrono::Utc;

    fn create_test_dashboard() -> Dashboard {
        let mut summary = OperatorSummary::new("CH*REP".to_string(), "Repower".to_string());
        summary.push_station(
            "CH*REP*E1001".to_string(),
            "available".to_string(),
            StatusBucket::Available,
        );
        summary.push_station(
            "CH*REP*E1002".to_string(),
            "unknown".to_string(),
            StatusBucket::Unknown,
        );

        Dashboard::new(
            DashboardMetadata {
                stations_url: "https://example.test/data.json".to_string(),
                status_url: "https://example.test/status.json".to_string(),
                fetched_at: Utc::now(),
                stations_error: None,
                status_error: Some("HTTP 503".to_string()),
            },
            vec![summary],
        )
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_dashboard(), false);

        assert!(markdown.contains("# Charging Dashboard"));
        assert!(markdown.contains("## Snapshot"));
        assert!(markdown.contains("## Overview"));
        assert!(markdown.contains("## Operators"));
        assert!(markdown.contains("Repower"));
        assert!(markdown.contains("**Status feed error:** HTTP 503"));
        assert!(!markdown.contains("## Stations"));
    }

    #[test]
    fn test_markdown_station_listing() {
        let markdown = generate_markdown_report(&create_test_dashboard(), true);

        assert!(markdown.contains("## Stations"));
        assert!(markdown.contains("`CH*REP*E1001`"));
        assert!(markdown.contains("available"));
    }

    #[test]
    fn test_markdown_empty_dashboard() {
        let board = Dashboard::new(
            DashboardMetadata {
                stations_url: String::new(),
                status_url: String::new(),
                fetched_at: Utc::now(),
                stations_error: None,
                status_error: None,
            },
            vec![],
        );

        let markdown = generate_markdown_report(&board, false);
        assert!(markdown.contains("No operators present"));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_dashboard()).unwrap();

        assert!(json.contains("\"operators\""));
        assert!(json.contains("\"total_stations\""));
        assert!(json.contains("\"CH*REP\""));
        assert!(json.contains("\"status_error\""));
    }
}
