//! Outbound query construction.
//!
//! Flattens a [`FilterSet`] into query pairs: scalars as `key=value`, lists
//! comma-joined, booleans as `"1"/"0"`. Blank values (empty string, empty
//! list) are omitted entirely rather than sent as empty params.

use crate::types::{FilterSet, FilterValue};

/// Flatten a filter set into outgoing query pairs, preserving order.
pub fn query_pairs(filters: &FilterSet) -> Vec<(String, String)> {
    filters
        .iter()
        .filter(|(_, value)| !value.is_blank())
        .map(|(key, value)| (key.to_string(), encode_value(value)))
        .collect()
}

fn encode_value(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(s) => s.clone(),
        FilterValue::Flag(true) => "1".to_string(),
        FilterValue::Flag(false) => "0".to_string(),
        FilterValue::List(values) => values.join(","),
    }
}
