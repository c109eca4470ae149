//! Merge & aggregate: correlate the two feeds into per-operator summaries.
//!
//! Everything here is a pure function over the fetched documents. Either
//! document may be absent; the merge degrades to empty collections and
//! never errors, so the caller can recompute on every refresh without
//! coordination.

use std::collections::HashMap;

use crate::feeds::{EvseDataDocument, EvseStatusDocument};
use crate::models::{ChartRow, OperatorSummary, StatusBucket};

/// Fallback status stored for stations the status feed does not know.
pub const UNKNOWN_STATUS: &str = "unknown";

/// Build the EvseID → normalized status index from the status document.
///
/// Statuses are trimmed and lowercased eagerly; bucketing re-normalizes
/// later, which is idempotent. Duplicate EvseIDs overwrite (last write
/// wins, matching the unspecified upstream behavior).
pub fn build_status_index(status: &EvseStatusDocument) -> HashMap<String, String> {
    let mut index = HashMap::new();

    for operator in &status.operators {
        for record in &operator.records {
            let normalized = record
                .status
                .as_deref()
                .unwrap_or(UNKNOWN_STATUS)
                .trim()
                .to_lowercase();
            index.insert(record.evse_id.clone(), normalized);
        }
    }

    index
}

/// Merge the metadata and status documents into per-operator summaries.
///
/// An absent metadata document yields an empty list regardless of status
/// content; an absent status document leaves every station in the unknown
/// bucket. The result is sorted by descending station count; the sort is
/// stable, so ties keep metadata encounter order.
pub fn merge_documents(
    data: Option<&EvseDataDocument>,
    status: Option<&EvseStatusDocument>,
) -> Vec<OperatorSummary> {
    let Some(data) = data else {
        return Vec::new();
    };

    let index = status.map(build_status_index).unwrap_or_default();

    let mut summaries: Vec<OperatorSummary> = Vec::with_capacity(data.operators.len());
    for operator in &data.operators {
        let mut summary = OperatorSummary::new(
            operator.operator_id.clone(),
            operator.operator_name.clone(),
        );

        for record in &operator.records {
            let resolved = index
                .get(&record.evse_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string());
            let bucket = StatusBucket::from_raw(&resolved);
            summary.push_station(record.evse_id.clone(), resolved, bucket);
        }

        summaries.push(summary);
    }

    summaries.sort_by(|a, b| b.total_stations.cmp(&a.total_stations));
    summaries
}

/// Project summaries into display-ready chart rows, preserving order.
pub fn chart_rows(summaries: &[OperatorSummary]) -> Vec<ChartRow> {
    summaries.iter().map(ChartRow::from_summary).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::documents::{OperatorData, OperatorStatus, StationRecord, StatusRecord};
    use crate::models::OverallStats;

    fn data_document(operators: &[(&str, &str, &[&str])]) -> EvseDataDocument {
        EvseDataDocument {
            operators: operators
                .iter()
                .map(|(id, name, stations)| OperatorData {
                    operator_id: id.to_string(),
                    operator_name: name.to_string(),
                    records: stations
                        .iter()
                        .map(|evse_id| StationRecord {
                            evse_id: evse_id.to_string(),
                            ..Default::default()
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn status_document(records: &[(&str, Option<&str>)]) -> EvseStatusDocument {
        EvseStatusDocument {
            operators: vec![OperatorStatus {
                operator_id: "OP-STATUS".to_string(),
                operator_name: "Status Block".to_string(),
                records: records
                    .iter()
                    .map(|(evse_id, status)| StatusRecord {
                        evse_id: evse_id.to_string(),
                        status: status.map(String::from),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_absent_metadata_yields_empty_list() {
        let status = status_document(&[("A", Some("Available"))]);
        let summaries = merge_documents(None, Some(&status));
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_absent_status_buckets_everything_unknown() {
        let data = data_document(&[("OP1", "One", &["A", "B", "C"])]);
        let summaries = merge_documents(Some(&data), None);

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.total_stations, 3);
        assert_eq!(summary.unknown, 3);
        assert_eq!(summary.available, 0);
        assert_eq!(summary.occupied, 0);
        assert_eq!(summary.out_of_order, 0);
        assert_eq!(summary.statuses.get("A"), Some(&UNKNOWN_STATUS.to_string()));
    }

    #[test]
    fn test_merge_example() {
        // OP1 with A/B/C; status maps A→Available, B→Charging, no entry for C
        let data = data_document(&[("OP1", "One", &["A", "B", "C"])]);
        let status = status_document(&[("A", Some("Available")), ("B", Some("Charging"))]);

        let summaries = merge_documents(Some(&data), Some(&status));
        let summary = &summaries[0];

        assert_eq!(summary.total_stations, 3);
        assert_eq!(summary.available, 1);
        assert_eq!(summary.occupied, 1);
        assert_eq!(summary.out_of_order, 0);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.statuses.get("A"), Some(&"available".to_string()));
        assert_eq!(summary.statuses.get("B"), Some(&"charging".to_string()));
        assert_eq!(summary.statuses.get("C"), Some(&"unknown".to_string()));
    }

    #[test]
    fn test_bucket_sum_invariant() {
        let data = data_document(&[
            ("OP1", "One", &["A", "B", "C", "D"]),
            ("OP2", "Two", &["E", "F"]),
        ]);
        let status = status_document(&[
            ("A", Some("Available")),
            ("B", Some("Faulted")),
            ("C", Some("Reserved")),
            ("E", Some("occupied")),
        ]);

        for summary in merge_documents(Some(&data), Some(&status)) {
            assert_eq!(
                summary.total_stations,
                summary.available + summary.occupied + summary.out_of_order + summary.unknown
            );
        }
    }

    #[test]
    fn test_status_feed_never_adds_stations() {
        let data = data_document(&[("OP1", "One", &["A"])]);
        let status = status_document(&[
            ("A", Some("Available")),
            ("GHOST", Some("Available")),
        ]);

        let summaries = merge_documents(Some(&data), Some(&status));
        let stats = OverallStats::from_summaries(&summaries);
        assert_eq!(stats.total_stations, 1);
    }

    #[test]
    fn test_sort_descending_and_stable() {
        let data = data_document(&[
            ("OP1", "Five A", &["A1", "A2", "A3", "A4", "A5"]),
            ("OP2", "Twenty", &[
                "B01", "B02", "B03", "B04", "B05", "B06", "B07", "B08", "B09", "B10",
                "B11", "B12", "B13", "B14", "B15", "B16", "B17", "B18", "B19", "B20",
            ]),
            ("OP3", "Five B", &["C1", "C2", "C3", "C4", "C5"]),
            ("OP4", "One", &["D1"]),
        ]);

        let summaries = merge_documents(Some(&data), None);
        let order: Vec<&str> = summaries.iter().map(|s| s.operator_id.as_str()).collect();
        assert_eq!(order, vec!["OP2", "OP1", "OP3", "OP4"]);
    }

    #[test]
    fn test_status_index_normalizes_and_overwrites() {
        let status = status_document(&[
            ("A", Some("  Available ")),
            ("A", Some("OCCUPIED")),
            ("B", None),
        ]);

        let index = build_status_index(&status);
        // Last write wins for the duplicate EvseID
        assert_eq!(index.get("A"), Some(&"occupied".to_string()));
        assert_eq!(index.get("B"), Some(&UNKNOWN_STATUS.to_string()));
    }

    #[test]
    fn test_empty_operator_keeps_zero_counts() {
        let data = data_document(&[("OP1", "Empty", &[])]);
        let summaries = merge_documents(Some(&data), None);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_stations, 0);
        assert!(summaries[0].stations.is_empty());
    }

    #[test]
    fn test_chart_rows_preserve_order() {
        let data = data_document(&[
            ("OP1", "Small", &["A"]),
            ("OP2", "Large", &["B", "C"]),
        ]);
        let summaries = merge_documents(Some(&data), None);
        let rows = chart_rows(&summaries);

        assert_eq!(rows.len(), summaries.len());
        assert_eq!(rows[0].operator_name, "Large");
        assert_eq!(rows[1].operator_name, "Small");
        assert_eq!(rows[0].total, 2);
    }
}
