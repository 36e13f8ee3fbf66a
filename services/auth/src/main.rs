use sea_orm::Database;
use tracing::info;

use equiptrack_auth::config::AuthConfig;
use equiptrack_auth::infra::email::SmtpMailer;
use equiptrack_auth::infra::hash::CredentialHasher;
use equiptrack_auth::router::build_router;
use equiptrack_auth::state::AppState;

#[tokio::main]
async fn main() {
    equiptrack_core::tracing::init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::from_config(&config).expect("failed to build SMTP mailer");

    let state = AppState {
        db,
        access_token_secret: config.access_token_secret,
        refresh_token_secret: config.refresh_token_secret,
        hasher: CredentialHasher {
            cost: config.bcrypt_cost,
            pepper: config.pepper_secret,
        },
        mailer,
        production: config.production,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
