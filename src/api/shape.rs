//! Row-to-wire shaping helpers shared by the aggregator handlers.
//!
//! These operate on raw datastore rows (`serde_json::Map`) and are
//! parameterized over field selectors, since the same grouping and pivot
//! patterns recur across several endpoints.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::datastore::Row;

/// Read an integer field off a row.
pub fn int_field(row: &Row, key: &str) -> Option<i64> {
    row.get(key).and_then(Value::as_i64)
}

/// Group rows into an ordered map keyed by `group_key`, dropping rows whose
/// `unique_key` already appeared within their group (first occurrence wins).
///
/// Group order follows first appearance in `rows`; rows without a group key
/// are skipped. The output map keeps insertion order, so an upstream sort
/// survives into the serialized payload.
pub fn group_rows_unique<G, U>(rows: Vec<Row>, group_key: G, unique_key: U) -> Map<String, Value>
where
    G: Fn(&Row) -> Option<i64>,
    U: Fn(&Row) -> Option<i64>,
{
    let mut groups: Map<String, Value> = Map::new();
    let mut seen: HashMap<i64, HashSet<Option<i64>>> = HashMap::new();

    for row in rows {
        let Some(key) = group_key(&row) else { continue };

        // A duplicate unique key within the group is dropped; two rows both
        // missing the unique key count as duplicates of each other.
        if !seen.entry(key).or_default().insert(unique_key(&row)) {
            continue;
        }

        let entry = groups
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = entry {
            items.push(Value::Object(row));
        }
    }

    groups
}

/// Pivot rows into per-column value arrays, skipping cells that are null,
/// absent, or blank after trimming. Each column filters independently, so
/// the output arrays may have different lengths.
pub fn pivot_columns(rows: &[Row], columns: &[&str]) -> Map<String, Value> {
    let mut out = Map::new();
    for column in columns {
        let values: Vec<Value> = rows
            .iter()
            .filter_map(|row| row.get(*column))
            .filter(|value| !is_blank(value))
            .cloned()
            .collect();
        out.insert((*column).to_string(), Value::Array(values));
    }
    out
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Split off the single distinguished header row (the one whose `field`
/// equals `marker`) from the body rows, which keep their incoming order.
/// Extra marker rows, if the data ever carries them, are dropped.
pub fn split_header_row(rows: Vec<Row>, field: &str, marker: &str) -> (Option<Row>, Vec<Row>) {
    let mut header = None;
    let mut body = Vec::with_capacity(rows.len());

    for row in rows {
        if row.get(field).and_then(Value::as_str) == Some(marker) {
            if header.is_none() {
                header = Some(row);
            }
        } else {
            body.push(row);
        }
    }

    (header, body)
}

/// Delete every field whose trimmed string value equals the trimmed search
/// term. Substring matches stay; the row itself is never dropped.
pub fn redact_exact_matches(row: &mut Row, term: &str) {
    let term = term.trim();
    let matching: Vec<String> = row
        .iter()
        .filter(|(_, value)| value.as_str().map(|s| s.trim() == term).unwrap_or(false))
        .map(|(key, _)| key.clone())
        .collect();
    for key in matching {
        row.remove(&key);
    }
}
