use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::{authenticate, AuthUser};
use crate::error::ApiError;
use crate::AppState;

pub const ROLE_ADMIN: &str = "admin";

/// Role-based gate, run after required-mode authentication has attached an
/// `AuthUser`. Absent identity is a 401; a role outside the accepted set is
/// a 403.
pub fn check_role(user: Option<&AuthUser>, allowed: &[&str]) -> Result<(), ApiError> {
    let user = user.ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if allowed.contains(&user.role.as_str()) {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "Access denied. Required role: {}",
            allowed.join(" or ")
        )))
    }
}

/// Middleware form of [`check_role`], for composing after `require_auth`:
///
/// ```ignore
/// router.layer(middleware::from_fn(|req, next| {
///     role::require_role(&[role::ROLE_ADMIN], req, next)
/// }))
/// ```
pub async fn require_role(
    allowed: &'static [&'static str],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_role(request.extensions().get::<AuthUser>(), allowed)?;
    Ok(next.run(request).await)
}

/// Convenience composition: required authentication followed by a hard-coded
/// admin role check. Any failure of the inner authentication step reports as
/// 401, never as a different shape.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, request.headers())
        .await
        .map_err(|_| ApiError::unauthorized("Authentication required"))?;

    check_role(Some(&user), &[ROLE_ADMIN])?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
