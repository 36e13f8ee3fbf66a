use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use equiptrack_auth_types::cookie::{EQUIPTRACK_REFRESH_TOKEN, clear_refresh_token_cookie};

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::token::RefreshTokenUseCase;

// ── POST /auth/refresh ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<RefreshResponse>, AuthServiceError> {
    let refresh_value = jar
        .get(EQUIPTRACK_REFRESH_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::RefreshTokenRequired)?;

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        access_token_secret: state.access_token_secret.clone(),
        refresh_token_secret: state.refresh_token_secret.clone(),
    };
    let out = usecase.execute(&refresh_value).await?;

    Ok(Json(RefreshResponse {
        access_token: out.access_token,
    }))
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

/// Clears the refresh cookie. The refresh token itself stays valid until it
/// expires; there is no server-side revocation in this design.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let jar = clear_refresh_token_cookie(jar, state.production);
    Ok((jar, Json(serde_json::json!({ "message": "logged out" }))))
}
