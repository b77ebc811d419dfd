use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::parse_numeric_id;
use crate::api::shape::redact_exact_matches;
use crate::datastore::{Row, SelectQuery};
use crate::error::ApiError;
use crate::AppState;

const DICTIONARY_ENTRIES: &str = "dictionary_entries";

// Every text-bearing column participates in term search and redaction.
const TEXT_COLUMNS: &[&str] = &[
    "transliteration",
    "arabic_text",
    "arabic_text_with_diacritics",
    "translation",
    "tense",
    "guf",
    "wazen",
    "shoresh",
    "extras",
    "verb_irregularity_class",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryQuery {
    pub article_id: Option<String>,
    pub term: Option<String>,
}

/// GET /api/dictionary?articleId=&term= - entries for one article
///
/// With a term: case-insensitive substring match across all text columns
/// (logical OR), and any field whose trimmed value exactly equals the
/// trimmed term is stripped from the returned entry. A search with no hits
/// is a valid empty list.
pub async fn dictionary_list_get(
    State(state): State<AppState>,
    Query(params): Query<DictionaryQuery>,
) -> Result<Json<Value>, ApiError> {
    let raw_id = params
        .article_id
        .as_deref()
        .ok_or_else(|| ApiError::validation("Invalid article ID"))?;
    let article_id = parse_numeric_id(raw_id, "article ID")?;
    let term = trimmed_term(&params);

    let mut query = select_entries().eq("article_id", article_id);
    if let Some(term) = term {
        query = query.ilike_any(TEXT_COLUMNS, term);
    }

    let mut rows = state.data.fetch(query).await.map_err(|e| {
        tracing::error!("Error retrieving dictionary data: {}", e);
        ApiError::internal("Error retrieving dictionary data")
    })?;

    if let Some(term) = term {
        for row in &mut rows {
            redact_exact_matches(row, term);
        }
    }

    Ok(Json(rows_to_value(rows)))
}

/// GET /api/dictionary/:id?articleId=&term= - single entry lookup
///
/// The term drives redaction only; an id lookup is never filtered away by a
/// non-matching term.
pub async fn dictionary_entry_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DictionaryQuery>,
) -> Result<Json<Value>, ApiError> {
    let entry_id = parse_numeric_id(&id, "dictionary entry ID")?;
    let term = trimmed_term(&params);

    let mut query = select_entries().eq("id", entry_id);
    if let Some(raw) = params.article_id.as_deref() {
        query = query.eq("article_id", parse_numeric_id(raw, "article ID")?);
    }

    let row = state.data.fetch_optional(query).await.map_err(|e| {
        tracing::error!("Error retrieving dictionary entry: {}", e);
        ApiError::internal("Error retrieving dictionary data")
    })?;

    let mut row = row.ok_or_else(|| {
        ApiError::not_found(format!("No dictionary entry found for ID {}", entry_id))
    })?;

    if let Some(term) = term {
        redact_exact_matches(&mut row, term);
    }

    Ok(Json(Value::Object(row)))
}

fn select_entries() -> SelectQuery {
    let mut columns = vec!["id"];
    columns.extend_from_slice(TEXT_COLUMNS);
    SelectQuery::table(DICTIONARY_ENTRIES).columns(&columns)
}

fn trimmed_term(params: &DictionaryQuery) -> Option<&str> {
    params
        .term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn rows_to_value(rows: Vec<Row>) -> Value {
    Value::Array(rows.into_iter().map(Value::Object).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_terms_are_ignored() {
        let params = DictionaryQuery {
            article_id: Some("1".into()),
            term: Some("   ".into()),
        };
        assert_eq!(trimmed_term(&params), None);

        let params = DictionaryQuery {
            article_id: None,
            term: Some(" shoresh ".into()),
        };
        assert_eq!(trimmed_term(&params), Some("shoresh"));
    }

    #[test]
    fn entry_select_exposes_id_and_all_text_columns() {
        let params = select_entries().into_params();
        let select = &params[0].1;
        assert!(select.starts_with("id,transliteration,"));
        assert!(select.ends_with("verb_irregularity_class"));
    }
}
