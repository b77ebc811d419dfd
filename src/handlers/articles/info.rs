use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::datastore::{Row, SelectQuery};
use crate::error::ApiError;
use crate::AppState;

const LETTER_MAP: &str = "letter_map";
const LETTER_MAP_SUB_ROWS: &str = "letter_map_sub_rows";
const LETTER_MAP_HEADERS: &str = "letter_map_headers";
const ARABIC_VOWELS: &str = "arabic_vowels";

const LETTER_MAP_COLUMNS: &[&str] = &[
    "extras",
    "taatic_map",
    "arabic_letter",
    "letter_name_taatic",
    "letter_name_arabic",
];

/// GET /api/info/arabic-taatic-map - the letter-mapping reference tables
///
/// Three queries issued in sequence; the first failure aborts, naming the
/// table that failed. The header table is projected down to its sub_title
/// column.
pub async fn arabic_taatic_map_get(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let letter_map = fetch_info_table(&state, LETTER_MAP, LETTER_MAP_COLUMNS).await?;
    let sub_rows = fetch_info_table(&state, LETTER_MAP_SUB_ROWS, LETTER_MAP_COLUMNS).await?;
    let header_rows = fetch_info_table(&state, LETTER_MAP_HEADERS, &["sub_title"]).await?;

    let headers: Vec<Value> = header_rows
        .iter()
        .filter_map(|row| row.get("sub_title").cloned())
        .collect();

    tracing::debug!(
        "arabic-taatic-map counts: headers={}, map={}, sub_rows={}",
        headers.len(),
        letter_map.len(),
        sub_rows.len()
    );

    Ok(Json(json!({
        "headers": headers,
        "letterMap": letter_map,
        "letterMapSubRows": sub_rows,
    })))
}

/// GET /api/info/arabic-vowels - vowel-notation reference rows, stable order
pub async fn arabic_vowels_get(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rows = fetch_info_table(&state, ARABIC_VOWELS, &["id", "name", "explanation"]).await?;

    if rows.is_empty() {
        return Err(ApiError::not_found("No vowel entries found"));
    }

    Ok(Json(Value::Array(
        rows.into_iter().map(Value::Object).collect(),
    )))
}

async fn fetch_info_table(
    state: &AppState,
    table: &str,
    columns: &[&str],
) -> Result<Vec<Row>, ApiError> {
    let query = SelectQuery::table(table).columns(columns).order_asc("id");

    state.data.fetch(query).await.map_err(|e| {
        tracing::error!("Error fetching {}: {}", table, e);
        ApiError::internal(format!("Error fetching {}", table))
    })
}
