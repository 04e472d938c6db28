use crate::db::models::{Discrepancy, ExtractedData, Record};
use serde_json::Value;
use std::collections::BTreeMap;

/// Compares extracted report data with the stored record.
///
/// Only keys present on both sides are reported. Numbers are compared by value, so an
/// integer matches the equal float.
pub fn compare_data(extracted: &ExtractedData, stored: &Record) -> BTreeMap<String, Discrepancy> {
    let stored = stored.to_map();

    extracted
        .iter()
        .filter_map(|(key, extracted_value)| {
            let stored_value = stored.get(key)?;
            Some((
                key.clone(),
                Discrepancy {
                    extracted: extracted_value.clone(),
                    stored: stored_value.clone(),
                    is_match: values_match(extracted_value, stored_value),
                },
            ))
        })
        .collect()
}

fn values_match(extracted: &Value, stored: &Value) -> bool {
    match (extracted.as_f64(), stored.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => extracted == stored,
    }
}
