use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/user/starred - the user's starred dictionary items
///
/// A user with no stored preference row gets `items: []`. Read failures
/// also degrade to an empty list with a 200 so the dependent UI keeps
/// working; the failure is logged here.
pub async fn starred_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Json<Value> {
    match state.prefs.starred_items(user.id).await {
        Ok(items) => Json(json!({ "success": true, "items": items })),
        Err(err) => {
            tracing::error!("Error fetching starred items for user {}: {}", user.id, err);
            Json(json!({ "success": false, "items": [] }))
        }
    }
}

/// PUT /api/user/starred - full replace of the starred list
///
/// Body: `{"items": [...]}`. The list is validated before any remote call;
/// the stored value is overwritten, never merged.
pub async fn starred_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| ApiError::validation("items must be an array"))?;

    state
        .prefs
        .replace_starred_items(user.id, items)
        .await
        .map_err(|e| {
            tracing::error!("Error updating starred items for user {}: {}", user.id, e);
            ApiError::internal("Error updating starred items")
        })?;

    Ok(Json(json!({ "success": true })))
}
