use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key/value data pulled out of an uploaded report
pub type ExtractedData = Map<String, Value>;

/// Outcome of comparing one field of the report against the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Value found in the uploaded report
    pub extracted: Value,
    /// Value stored in the database
    pub stored: Value,
    /// Whether both values agree
    #[serde(rename = "match")]
    pub is_match: bool,
}

/// Response structure for a processed upload
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Company name as read from the report
    pub company_name: String,
    /// Everything extracted from the report
    pub extracted_data: ExtractedData,
    /// The matching database record, flattened
    pub stored_data: Map<String, Value>,
    /// Per-field comparison for fields present on both sides
    pub discrepancies: BTreeMap<String, Discrepancy>,
}

impl UploadResponse {
    /// Number of compared fields that disagree
    pub fn mismatch_count(&self) -> usize {
        self.discrepancies.values().filter(|d| !d.is_match).count()
    }
}
