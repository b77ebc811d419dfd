use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_numeric_id;
use crate::api::shape::{pivot_columns, split_header_row};
use crate::datastore::SelectQuery;
use crate::error::ApiError;
use crate::AppState;

const BINYAN_LISTS: &str = "binyan_lists";
const CONJUGATION_ROWS: &str = "conjugation_rows";

// One list per gizra (root class); each is an independent column upstream.
const BINYAN_LIST_COLUMNS: [&str; 5] = [
    "shlemim",
    "kfulim",
    "pe_vav_yud",
    "ayin_vav_yud",
    "lamed_vav_yud",
];

// The row whose guf column carries this literal is the table header.
const GUF_HEADER_MARKER: &str = "גוף";

/// GET /api/verb-tables - the five binyan lists
///
/// Rows arrive column-per-gizra; the response pivots them into five arrays,
/// skipping blank cells per column, so the lists can have different lengths.
pub async fn binyan_lists_get(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let query = SelectQuery::table(BINYAN_LISTS).columns(&BINYAN_LIST_COLUMNS);

    let rows = state.data.fetch(query).await.map_err(|e| {
        tracing::error!("Error fetching binyan lists: {}", e);
        ApiError::internal("Error fetching binyan lists")
    })?;

    if rows.is_empty() {
        return Err(ApiError::not_found("No binyan lists found"));
    }

    Ok(Json(Value::Object(pivot_columns(
        &rows,
        &BINYAN_LIST_COLUMNS,
    ))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConjugationQuery {
    pub wazen_id: Option<String>,
}

/// GET /api/verb-tables/binyan?wazenId= - one conjugation table
///
/// Ordered by guf; the distinguished header row is emitted separately from
/// the body. Without a wazenId the full table across all wazen groups comes
/// back.
pub async fn conjugation_table_get(
    State(state): State<AppState>,
    Query(params): Query<ConjugationQuery>,
) -> Result<Json<Value>, ApiError> {
    let mut query = SelectQuery::table(CONJUGATION_ROWS)
        .columns(&[
            "masdar",
            "passive_participle",
            "active_participle",
            "imperative_1",
            "imperative_2",
            "imperative_3",
            "present_future_a",
            "present_future_b",
            "present_future_c",
            "past_a",
            "past_b",
            "guf",
            "wazen_id",
        ])
        .order_asc("guf");

    if let Some(raw) = params.wazen_id.as_deref().filter(|w| !w.trim().is_empty()) {
        query = query.eq("wazen_id", parse_numeric_id(raw, "wazen ID")?);
    }

    let rows = state.data.fetch(query).await.map_err(|e| {
        tracing::error!("Error fetching verb table: {}", e);
        ApiError::internal("Error fetching verb table")
    })?;

    if rows.is_empty() {
        return Err(ApiError::not_found("No conjugation rows found"));
    }

    let (header, rows) = split_header_row(rows, "guf", GUF_HEADER_MARKER);

    Ok(Json(json!({
        "header": header.map(Value::Object),
        "rows": rows.into_iter().map(Value::Object).collect::<Vec<_>>(),
    })))
}
