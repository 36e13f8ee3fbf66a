use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::verify_email::VerifyEmailUseCase;

#[derive(Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Json<serde_json::Value>, AuthServiceError> {
    let usecase = VerifyEmailUseCase {
        users: state.user_repo(),
        tokens: state.verification_token_repo(),
    };
    usecase.execute(&query.token).await?;
    Ok(Json(serde_json::json!({ "message": "email verified" })))
}
