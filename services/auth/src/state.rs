use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOneTimeCodeRepository, DbUserRepository, DbVerificationTokenRepository};
use crate::infra::email::SmtpMailer;
use crate::infra::hash::CredentialHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub hasher: CredentialHasher,
    pub mailer: SmtpMailer,
    /// Drives the `Secure` attribute on the refresh cookie.
    pub production: bool,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otc_repo(&self) -> DbOneTimeCodeRepository {
        DbOneTimeCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn verification_token_repo(&self) -> DbVerificationTokenRepository {
        DbVerificationTokenRepository {
            db: self.db.clone(),
        }
    }
}
