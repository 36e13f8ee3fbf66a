use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::register::{RegisterInput, RegisterUseCase};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub security_question_1: String,
    pub answer_1: String,
    pub security_question_2: String,
    pub answer_2: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        tokens: state.verification_token_repo(),
        mail: state.mailer.clone(),
        hasher: state.hasher.clone(),
    };
    usecase
        .execute(RegisterInput {
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
            security_question_1: body.security_question_1,
            answer_1: body.answer_1,
            security_question_2: body.security_question_2,
            answer_2: body.answer_2,
        })
        .await?;
    Ok(StatusCode::CREATED)
}
