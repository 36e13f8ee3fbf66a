//! Bearer-token authentication and role gating.
//!
//! `require_auth` validates the token and attaches the decoded identity to
//! the request extensions; `require_role` composes after it and checks the
//! attached role without re-verifying the token.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use equiptrack_auth_types::token::{TokenInfo, validate_access_token};
use equiptrack_domain::user::UserRole;

use crate::error::AuthServiceError;
use crate::state::AppState;

pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// 401 when no bearer token is presented, 403 when one is presented but
/// fails validation (bad signature, expired, or malformed claims).
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthServiceError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthServiceError::TokenRequired)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthServiceError::TokenRequired)?;

    let info = validate_access_token(token, &state.access_token_secret)
        .map_err(|_| AuthServiceError::InvalidToken)?;

    req.extensions_mut().insert::<TokenInfo>(info);
    Ok(next.run(req).await)
}

/// 403 unless the identity attached by [`require_auth`] carries one of the
/// allowed roles. Must be layered inside `require_auth`.
pub async fn require_role(
    allowed: &'static [UserRole],
    req: Request,
    next: Next,
) -> Result<Response, AuthServiceError> {
    let info = req
        .extensions()
        .get::<TokenInfo>()
        .ok_or(AuthServiceError::InvalidToken)?;
    if !allowed.contains(&info.role) {
        return Err(AuthServiceError::Forbidden);
    }
    Ok(next.run(req).await)
}
