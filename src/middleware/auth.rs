use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::datastore::VerifiedUser;
use crate::error::ApiError;
use crate::AppState;

/// Role assumed when the auth provider returns none.
pub const DEFAULT_ROLE: &str = "user";

/// Authenticated user context extracted from a verified bearer token.
/// Built fresh per request and carried in request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: String,
    pub metadata: Value,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<VerifiedUser> for AuthUser {
    fn from(user: VerifiedUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user
                .role
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            metadata: user.user_metadata,
            created_at: user.created_at,
        }
    }
}

/// Required-mode authentication: a hard gate in front of protected routes.
///
/// Header problems are rejected with 401 before any remote call is made.
/// A token the provider rejects is a 401; a verification transport failure
/// is a 500. On success the `AuthUser` is attached and the inner handler
/// runs exactly once.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, request.headers()).await?;
    tracing::debug!("authenticated user {} ({})", user.id, user.role);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Optional-mode authentication for freemium routes.
///
/// Identical token extraction, but every failure (missing header, bad
/// scheme, rejected token, unreachable provider) degrades to an anonymous
/// request. This path never blocks.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, request.headers()).await {
        Ok(user) => {
            tracing::debug!("optional auth: user {} authenticated", user.id);
            request.extensions_mut().insert(user);
        }
        Err(_) => {
            tracing::debug!("optional auth: continuing as anonymous");
        }
    }
    next.run(request).await
}

/// Shared verification step for both modes and the admin composition.
pub(crate) async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthUser, ApiError> {
    let token = extract_bearer_token(headers).map_err(ApiError::unauthorized)?;

    match state.data.verify_token(&token).await {
        Ok(Some(user)) => Ok(AuthUser::from(user)),
        Ok(None) => Err(ApiError::unauthorized(
            "Invalid or expired token. Please log in again.",
        )),
        Err(err) => {
            tracing::error!("Token verification failed: {}", err);
            Err(ApiError::internal("Failed to verify authentication"))
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Authentication required. Please log in.".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Invalid token format".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
