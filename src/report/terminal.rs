//! Terminal dashboard rendering.
//!
//! Renders the overview cards and one stacked status bar per operator as
//! plain text, suitable for a terminal or for piping into a file.

use crate::analysis::chart_rows;
use crate::models::{ChartRow, Dashboard, StatusBucket};

/// Width of a full-length stacked bar in glyph cells.
const BAR_WIDTH: usize = 40;

/// Render the complete text dashboard.
///
/// `top` limits the chart to the N largest operators (0 shows all);
/// `include_stations` appends the per-station status listing.
pub fn render_dashboard(dashboard: &Dashboard, top: usize, include_stations: bool) -> String {
    let mut out = String::new();

    out.push_str(&render_header(dashboard));
    out.push_str(&render_overview(dashboard));
    out.push_str(&render_chart(dashboard, top));

    if include_stations {
        out.push_str(&render_stations(dashboard));
    }

    out
}

/// Render the title line and any per-source fetch warnings.
fn render_header(dashboard: &Dashboard) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "⚡ Charging Dashboard — {}\n",
        dashboard.metadata.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if let Some(ref error) = dashboard.metadata.stations_error {
        section.push_str(&format!("⚠️  stations feed: {}\n", error));
    }
    if let Some(ref error) = dashboard.metadata.status_error {
        section.push_str(&format!("⚠️  status feed: {}\n", error));
    }

    section.push('\n');
    section
}

/// Render the overview cards: operator/station totals and bucket counts.
fn render_overview(dashboard: &Dashboard) -> String {
    let overall = &dashboard.overall;
    let mut section = String::new();

    section.push_str(&format!(
        "Operators: {} | Stations: {}\n",
        overall.operators, overall.total_stations
    ));
    section.push_str(&format!(
        "{} Available: {} | {} Occupied: {} | {} Out of order: {} | {} Unknown: {}\n\n",
        StatusBucket::Available.emoji(),
        overall.available,
        StatusBucket::Occupied.emoji(),
        overall.occupied,
        StatusBucket::OutOfOrder.emoji(),
        overall.out_of_order,
        StatusBucket::Unknown.emoji(),
        overall.unknown,
    ));

    section
}

/// Render the stacked bar chart over the largest operators.
fn render_chart(dashboard: &Dashboard, top: usize) -> String {
    let mut rows = chart_rows(&dashboard.operators);
    if top > 0 && rows.len() > top {
        rows.truncate(top);
    }

    if rows.is_empty() {
        return "No operators to display.\n".to_string();
    }

    let mut section = String::new();
    section.push_str(&format!(
        "{} available  {} occupied  {} out of order  {} unknown\n\n",
        StatusBucket::Available.glyph(),
        StatusBucket::Occupied.glyph(),
        StatusBucket::OutOfOrder.glyph(),
        StatusBucket::Unknown.glyph(),
    ));

    // Rows arrive sorted descending, so the first one sets the scale
    let max_total = rows.iter().map(|r| r.total).max().unwrap_or(0);

    for row in &rows {
        section.push_str(&format!(
            "{:<22} {:<width$}  {:>5}  ({}/{}/{}/{})\n",
            row.label,
            stacked_bar(row, max_total),
            row.total,
            row.available,
            row.occupied,
            row.out_of_order,
            row.unknown,
            width = BAR_WIDTH,
        ));
    }

    let hidden = dashboard.operators.len().saturating_sub(rows.len());
    if hidden > 0 {
        section.push_str(&format!("… and {} more operators\n", hidden));
    }

    section
}

/// Render the per-station status listing for every operator.
fn render_stations(dashboard: &Dashboard) -> String {
    let mut section = String::new();

    for summary in &dashboard.operators {
        section.push_str(&format!(
            "\n{} ({}) — {} stations\n",
            summary.operator_name, summary.operator_id, summary.total_stations
        ));

        for evse_id in &summary.stations {
            let status = summary
                .statuses
                .get(evse_id)
                .map(String::as_str)
                .unwrap_or("unknown");
            let bucket = StatusBucket::from_raw(status);
            section.push_str(&format!("  {} {:<30} {}\n", bucket.emoji(), evse_id, status));
        }
    }

    section
}

/// Build the stacked bar for one row, scaled against the largest operator.
///
/// Segment widths are assigned by cumulative rounding so they always sum
/// to the scaled bar length.
fn stacked_bar(row: &ChartRow, max_total: usize) -> String {
    if row.total == 0 || max_total == 0 {
        return String::new();
    }

    let scaled = ((row.total * BAR_WIDTH) / max_total).max(1);

    let segments = [
        (row.available, StatusBucket::Available.glyph()),
        (row.occupied, StatusBucket::Occupied.glyph()),
        (row.out_of_order, StatusBucket::OutOfOrder.glyph()),
        (row.unknown, StatusBucket::Unknown.glyph()),
    ];

    let mut bar = String::with_capacity(scaled * 3);
    let mut seen = 0usize;
    let mut filled = 0usize;
    for (count, glyph) in segments {
        seen += count;
        let target = seen * scaled / row.total;
        for _ in filled..target {
            bar.push(glyph);
        }
        filled = target;
    }

    bar
}
