//! Data models for the charging dashboard.
//!
//! This module contains the core data structures shared across the
//! merge, aggregation, and rendering steps: status buckets, per-operator
//! summaries, and display-ready chart rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Maximum operator name length in a chart label before truncation.
pub const MAX_LABEL_CHARS: usize = 20;

/// Canonical status bucket for a single charging point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// Free and ready to charge.
    Available,
    /// A vehicle is plugged in or charging.
    Occupied,
    /// Reported broken, faulted, or offline.
    OutOfOrder,
    /// No status reported, or a token outside the known vocabulary.
    Unknown,
}

impl StatusBucket {
    /// Normalize a raw feed status string into a bucket.
    ///
    /// Matching is case-insensitive and exact after trimming. Every input
    /// maps to exactly one bucket; vendor-specific codes and empty strings
    /// fall back to [`StatusBucket::Unknown`].
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "available" | "free" => StatusBucket::Available,
            "occupied" | "charging" => StatusBucket::Occupied,
            "outoforder" | "faulted" | "offline" => StatusBucket::OutOfOrder,
            _ => StatusBucket::Unknown,
        }
    }

    /// Short label used in cards and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            StatusBucket::Available => "Available",
            StatusBucket::Occupied => "Occupied",
            StatusBucket::OutOfOrder => "Out of order",
            StatusBucket::Unknown => "Unknown",
        }
    }

    /// Returns an emoji representation of the bucket.
    pub fn emoji(&self) -> &'static str {
        match self {
            StatusBucket::Available => "🟢",
            StatusBucket::Occupied => "🟡",
            StatusBucket::OutOfOrder => "🔴",
            StatusBucket::Unknown => "⚪",
        }
    }

    /// Glyph drawn for this bucket's segment of a terminal stacked bar.
    pub fn glyph(&self) -> char {
        match self {
            StatusBucket::Available => '█',
            StatusBucket::Occupied => '▓',
            StatusBucket::OutOfOrder => '▒',
            StatusBucket::Unknown => '░',
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Aggregated station statistics for a single operator.
///
/// Derived from one merge pass; recomputed whenever either source document
/// changes, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorSummary {
    /// Operator identifier from the metadata feed.
    pub operator_id: String,
    /// Operator display name from the metadata feed.
    pub operator_name: String,
    /// Total number of stations this operator lists in the metadata feed.
    pub total_stations: usize,
    /// Stations currently available.
    pub available: usize,
    /// Stations currently occupied or charging.
    pub occupied: usize,
    /// Stations reported out of order, faulted, or offline.
    pub out_of_order: usize,
    /// Stations with no or unrecognized status.
    pub unknown: usize,
    /// Station EvseIDs in metadata encounter order.
    pub stations: Vec<String>,
    /// Resolved lowercase status string per EvseID ("unknown" when the
    /// status feed has no entry).
    pub statuses: HashMap<String, String>,
}

impl OperatorSummary {
    /// Creates an empty summary for an operator.
    pub fn new(operator_id: String, operator_name: String) -> Self {
        Self {
            operator_id,
            operator_name,
            total_stations: 0,
            available: 0,
            occupied: 0,
            out_of_order: 0,
            unknown: 0,
            stations: Vec::new(),
            statuses: HashMap::new(),
        }
    }

    /// Record one station with its resolved status and bucket.
    ///
    /// Keeps `total_stations` equal to the sum of the four bucket counts.
    pub fn push_station(&mut self, evse_id: String, status: String, bucket: StatusBucket) {
        self.total_stations += 1;
        match bucket {
            StatusBucket::Available => self.available += 1,
            StatusBucket::Occupied => self.occupied += 1,
            StatusBucket::OutOfOrder => self.out_of_order += 1,
            StatusBucket::Unknown => self.unknown += 1,
        }
        self.stations.push(evse_id.clone());
        self.statuses.insert(evse_id, status);
    }
}

/// Totals across all operators of a dashboard snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallStats {
    /// Number of operators present in the metadata feed.
    pub operators: usize,
    /// Total number of stations across all operators.
    pub total_stations: usize,
    /// Stations currently available.
    pub available: usize,
    /// Stations currently occupied or charging.
    pub occupied: usize,
    /// Stations reported out of order.
    pub out_of_order: usize,
    /// Stations with no or unrecognized status.
    pub unknown: usize,
}

impl OverallStats {
    /// Fold a list of operator summaries into overall totals.
    ///
    /// Pure fold; an empty input yields the all-zero value.
    pub fn from_summaries(summaries: &[OperatorSummary]) -> Self {
        let mut stats = Self::default();
        stats.operators = summaries.len();

        for summary in summaries {
            stats.total_stations += summary.total_stations;
            stats.available += summary.available;
            stats.occupied += summary.occupied;
            stats.out_of_order += summary.out_of_order;
            stats.unknown += summary.unknown;
        }

        stats
    }
}

/// Flat, display-ready projection of one [`OperatorSummary`] chart entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRow {
    /// Operator name truncated for axis display.
    pub label: String,
    /// Untruncated operator name, kept for the detail column.
    pub operator_name: String,
    pub available: usize,
    pub occupied: usize,
    pub out_of_order: usize,
    pub unknown: usize,
    pub total: usize,
}

impl ChartRow {
    /// Project a summary into a chart row. One-to-one and order-preserving.
    pub fn from_summary(summary: &OperatorSummary) -> Self {
        Self {
            label: truncate_label(&summary.operator_name),
            operator_name: summary.operator_name.clone(),
            available: summary.available,
            occupied: summary.occupied,
            out_of_order: summary.out_of_order,
            unknown: summary.unknown,
            total: summary.total_stations,
        }
    }
}

/// Truncate a name to [`MAX_LABEL_CHARS`] characters, appending an ellipsis
/// marker when the name was longer.
fn truncate_label(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let mut label: String = name.chars().take(MAX_LABEL_CHARS).collect();
        label.push('…');
        label
    } else {
        name.to_string()
    }
}

/// Metadata about a dashboard snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetadata {
    /// URL the station metadata feed was fetched from.
    pub stations_url: String,
    /// URL the live status feed was fetched from.
    pub status_url: String,
    /// When the fetch pair settled.
    pub fetched_at: DateTime<Utc>,
    /// Fetch error for the stations feed, if the last attempt failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stations_error: Option<String>,
    /// Fetch error for the status feed, if the last attempt failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_error: Option<String>,
}

/// A complete dashboard snapshot: merged summaries plus overall totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// Metadata about the snapshot.
    pub metadata: DashboardMetadata,
    /// Totals across all operators.
    pub overall: OverallStats,
    /// Per-operator summaries, sorted by descending station count.
    pub operators: Vec<OperatorSummary>,
}

impl Dashboard {
    /// Assemble a snapshot from merged summaries, computing the totals.
    pub fn new(metadata: DashboardMetadata, operators: Vec<OperatorSummary>) -> Self {
        let overall = OverallStats::from_summaries(&operators);
        Self {
            metadata,
            overall,
            operators,
        }
    }
}
