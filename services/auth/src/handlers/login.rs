use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Always `"verify-otc"`: the client's next step.
    pub step: &'static str,
    pub user_id: i64,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        otcs: state.otc_repo(),
        mail: state.mailer.clone(),
        hasher: state.hasher.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        step: "verify-otc",
        user_id: out.user_id,
    }))
}
