//! Wire types for the two public charging feeds.
//!
//! Both documents follow the OICP exchange shape: the metadata feed nests
//! station records under `EVSEData`, the live feed nests status records
//! under `EVSEStatuses`. Every field tolerates absence, so a missing
//! nested array deserializes to an empty collection instead of an error.

use serde::{Deserialize, Serialize};

/// Root of the station metadata feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvseDataDocument {
    /// Per-operator blocks of station records.
    #[serde(rename = "EVSEData", default)]
    pub operators: Vec<OperatorData>,
}

/// One operator's block of station records in the metadata feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorData {
    #[serde(rename = "OperatorID", default)]
    pub operator_id: String,

    #[serde(rename = "OperatorName", default)]
    pub operator_name: String,

    /// Station records; absent in some operator entries upstream.
    #[serde(rename = "EVSEDataRecord", default)]
    pub records: Vec<StationRecord>,
}

/// Static metadata for a single charging point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "EvseID", default)]
    pub evse_id: String,

    #[serde(rename = "Address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(
        rename = "HotlinePhoneNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hotline_phone_number: Option<String>,

    #[serde(
        rename = "PaymentOptions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_options: Option<Vec<String>>,
}

/// Postal address of a charging point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "City", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "Street", default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(rename = "PostalCode", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Root of the live status feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvseStatusDocument {
    /// Per-operator blocks of status records.
    #[serde(rename = "EVSEStatuses", default)]
    pub operators: Vec<OperatorStatus>,
}

/// One operator's block of status records in the live feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorStatus {
    #[serde(rename = "OperatorID", default)]
    pub operator_id: String,

    #[serde(rename = "OperatorName", default)]
    pub operator_name: String,

    #[serde(rename = "EVSEStatusRecord", default)]
    pub records: Vec<StatusRecord>,
}

/// Live status for a single charging point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusRecord {
    #[serde(rename = "EvseID", default)]
    pub evse_id: String,

    /// Raw status string; free text, absent for some stations.
    #[serde(rename = "EVSEStatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
