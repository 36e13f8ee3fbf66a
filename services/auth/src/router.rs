use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use equiptrack_core::health::{healthz, readyz};
use equiptrack_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{list_users, set_user_disabled, set_user_role},
    login::login,
    middleware::{ADMIN_ONLY, require_auth, require_role},
    otc::{resend_otc, verify_otc},
    register::register,
    token::{logout, refresh_token},
    verify_email::verify_email,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/role", put(set_user_role))
        .route("/admin/users/{id}/disable", put(set_user_disabled))
        .layer(middleware::from_fn(|req, next| {
            require_role(ADMIN_ONLY, req, next)
        }))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration and email verification
        .route("/auth/register", post(register))
        .route("/auth/verify-email", get(verify_email))
        // Login: first factor, then the OTC second factor
        .route("/auth/login", post(login))
        .route("/auth/verify-otc", post(verify_otc))
        .route("/auth/resend-otc", post(resend_otc))
        // Session
        .route("/auth/refresh", post(refresh_token))
        .route("/auth/logout", post(logout))
        // Admin
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
