use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use equiptrack_auth_types::cookie::set_refresh_token_cookie;
use equiptrack_domain::user::UserRole;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::otc::{ResendOtcUseCase, VerifyOtcInput, VerifyOtcUseCase};

// ── POST /auth/verify-otc ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtcRequest {
    pub user_id: i64,
    pub code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtcResponse {
    pub access_token: String,
    pub role: UserRole,
}

pub async fn verify_otc(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyOtcRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = VerifyOtcUseCase {
        users: state.user_repo(),
        otcs: state.otc_repo(),
        hasher: state.hasher.clone(),
        access_token_secret: state.access_token_secret.clone(),
        refresh_token_secret: state.refresh_token_secret.clone(),
    };
    let out = usecase
        .execute(VerifyOtcInput {
            user_id: body.user_id,
            code: body.code,
        })
        .await?;

    let jar = set_refresh_token_cookie(jar, out.refresh_token, state.production);

    Ok((
        jar,
        Json(VerifyOtcResponse {
            access_token: out.access_token,
            role: out.role,
        }),
    ))
}

// ── POST /auth/resend-otc ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtcRequest {
    pub user_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtcResponse {
    pub step: &'static str,
    pub user_id: i64,
}

pub async fn resend_otc(
    State(state): State<AppState>,
    Json(body): Json<ResendOtcRequest>,
) -> Result<Json<ResendOtcResponse>, AuthServiceError> {
    let usecase = ResendOtcUseCase {
        users: state.user_repo(),
        otcs: state.otc_repo(),
        mail: state.mailer.clone(),
        hasher: state.hasher.clone(),
    };
    usecase.execute(body.user_id).await?;
    Ok(Json(ResendOtcResponse {
        step: "verify-otc",
        user_id: body.user_id,
    }))
}
