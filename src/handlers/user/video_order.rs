use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/user/video-order - the user's custom article ordering
///
/// `order` is null until the user has saved one. Read failures degrade to
/// null with a 200, same availability rule as the starred list.
pub async fn video_order_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<Value> {
    match state.prefs.video_order(user.id).await {
        Ok(order) => Json(json!({ "success": true, "order": order })),
        Err(err) => {
            tracing::error!("Error fetching video order for user {}: {}", user.id, err);
            Json(json!({ "success": false, "order": Value::Null }))
        }
    }
}

/// PUT /api/user/video-order - full replace of the ordering
///
/// Body: `{"order": [articleId, ...]}`, numeric ids only.
pub async fn video_order_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let order = parse_order(&body)?;

    state
        .prefs
        .replace_video_order(user.id, order)
        .await
        .map_err(|e| {
            tracing::error!("Error updating video order for user {}: {}", user.id, e);
            ApiError::internal("Error updating video order")
        })?;

    Ok(Json(json!({ "success": true })))
}

fn parse_order(body: &Value) -> Result<Vec<i64>, ApiError> {
    let items = body
        .get("order")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::validation("order must be an array"))?;

    items
        .iter()
        .map(|v| {
            v.as_i64()
                .ok_or_else(|| ApiError::validation("order must contain only numeric article ids"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn order_array_parses() {
        let order = parse_order(&json!({ "order": [3, 1, 2] })).unwrap();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn missing_or_non_array_order_is_a_validation_error() {
        for body in [json!({}), json!({ "order": "3,1,2" }), json!({ "order": 3 })] {
            let err = parse_order(&body).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn non_numeric_entries_are_rejected() {
        let err = parse_order(&json!({ "order": [1, "two"] })).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
