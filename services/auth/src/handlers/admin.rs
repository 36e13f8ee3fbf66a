use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use equiptrack_auth_types::identity::Identity;
use equiptrack_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::admin::{ListUsersUseCase, SetDisabledUseCase, SetRoleUseCase};

/// User record as exposed to admins: everything except credential hashes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub verified: bool,
    pub disabled: bool,
    #[serde(serialize_with = "equiptrack_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            verified: user.verified,
            disabled: user.disabled,
            created_at: user.created_at,
        }
    }
}

// ── GET /admin/users ──────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AuthServiceError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── PUT /admin/users/{id}/role ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

pub async fn set_user_role(
    State(state): State<AppState>,
    Identity(actor): Identity,
    Path(user_id): Path<i64>,
    Json(body): Json<SetRoleRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = SetRoleUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id, body.role).await?;
    tracing::info!(actor = actor.user_id, user_id, role = %body.role, "role changed");
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /admin/users/{id}/disable ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetDisabledRequest {
    pub disabled: bool,
}

pub async fn set_user_disabled(
    State(state): State<AppState>,
    Identity(actor): Identity,
    Path(user_id): Path<i64>,
    Json(body): Json<SetDisabledRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = SetDisabledUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id, body.disabled).await?;
    tracing::info!(actor = actor.user_id, user_id, disabled = body.disabled, "disabled flag changed");
    Ok(StatusCode::NO_CONTENT)
}
