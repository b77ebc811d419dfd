use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::parse_numeric_id;
use crate::api::shape::{group_rows_unique, int_field};
use crate::datastore::SelectQuery;
use crate::error::ApiError;
use crate::AppState;

const ARTICLE_META: &str = "article_meta";
const ARTICLE_LINES: &str = "article_lines";

/// GET /api/article/:id - transcription lines plus video metadata
///
/// Lines come back sorted by line then word index; they are grouped per line
/// with duplicate word indexes dropped (first occurrence wins), matching the
/// shape the player consumes.
pub async fn article_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let article_id = parse_numeric_id(&id, "article ID")?;

    // 1) Video metadata; one row per article, absence is a 404
    let meta_query = SelectQuery::table(ARTICLE_META)
        .columns(&["url", "video_start", "video_end"])
        .eq("article_id", article_id);

    let meta = state.data.fetch_optional(meta_query).await.map_err(|e| {
        tracing::error!("Error fetching article metadata: {}", e);
        ApiError::internal("Error fetching article metadata")
    })?;

    let meta = meta.ok_or_else(|| ApiError::not_found("No metadata found for this article"))?;

    // 2) Transcription lines in playback order
    let lines_query = SelectQuery::table(ARTICLE_LINES)
        .columns(&[
            "id",
            "dictionary_id",
            "line_index",
            "word_index",
            "start_time",
            "end_time",
            "arabic_text",
            "taatic_text",
            "arabic_text_with_diacritics",
            "hebrew_words",
            "punctuation_marks",
        ])
        .eq("article_id", article_id)
        .order_asc("line_index")
        .order_asc("word_index");

    let rows = state.data.fetch(lines_query).await.map_err(|e| {
        tracing::error!("Error fetching transcription lines: {}", e);
        ApiError::internal("Error fetching transcription lines")
    })?;

    if rows.is_empty() {
        return Err(ApiError::not_found(format!(
            "No transcription found for article ID {}",
            article_id
        )));
    }

    let lines = group_rows_unique(
        rows,
        |row| int_field(row, "line_index"),
        |row| int_field(row, "word_index"),
    );

    Ok(Json(json!({
        "lines": lines,
        "startTime": meta.get("video_start").cloned().unwrap_or(Value::Null),
        "endTime": meta.get("video_end").cloned().unwrap_or(Value::Null),
        "url": meta.get("url").cloned().unwrap_or(Value::Null),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/article/:id", get(article_get))
            .with_state(crate::testing::test_state())
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected_before_any_remote_call() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/article/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["message"], "Invalid article ID");
    }

    #[tokio::test]
    async fn datastore_failure_maps_to_internal_error() {
        // the test state points at an unroutable address
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/article/12")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Error fetching article metadata");
    }
}
