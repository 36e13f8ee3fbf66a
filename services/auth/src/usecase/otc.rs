use chrono::{Duration, Utc};
use rand::RngExt;

use equiptrack_domain::user::UserRole;

use crate::domain::repository::{MailPort, OneTimeCodeRepository, UserRepository};
use crate::domain::types::{OTC_TTL_MINUTES, OneTimeCode, User};
use crate::error::AuthServiceError;
use crate::infra::hash::CredentialHasher;
use crate::usecase::token::{issue_access_token, issue_refresh_token};

/// Six decimal digits, leading zeros kept. `random_range` samples uniformly
/// (rejection under the hood), so the distribution carries no modulo skew.
fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:06}")
}

/// Hash and store a fresh code for the user (replacing any previous one)
/// and deliver the plaintext by email. The plaintext exists only on the
/// wire to the mailer; it is never persisted or logged.
pub async fn issue_code<O, M>(
    otcs: &O,
    mail: &M,
    hasher: &CredentialHasher,
    user: &User,
) -> Result<(), AuthServiceError>
where
    O: OneTimeCodeRepository,
    M: MailPort,
{
    let code = generate_code();
    let now = Utc::now();
    let record = OneTimeCode {
        user_id: user.id,
        code_hash: hasher.hash(&code).await?,
        expires_at: now + Duration::minutes(OTC_TTL_MINUTES),
        created_at: now,
    };
    otcs.replace(&record).await?;
    mail.send_one_time_code_email(&user.email, &code).await
}

// ── ResendOtc ────────────────────────────────────────────────────────────────

pub struct ResendOtcUseCase<U, O, M>
where
    U: UserRepository,
    O: OneTimeCodeRepository,
    M: MailPort,
{
    pub users: U,
    pub otcs: O,
    pub mail: M,
    pub hasher: CredentialHasher,
}

impl<U, O, M> ResendOtcUseCase<U, O, M>
where
    U: UserRepository,
    O: OneTimeCodeRepository,
    M: MailPort,
{
    pub async fn execute(&self, user_id: i64) -> Result<(), AuthServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        issue_code(&self.otcs, &self.mail, &self.hasher, &user).await
    }
}

// ── VerifyOtc ────────────────────────────────────────────────────────────────

pub struct VerifyOtcInput {
    pub user_id: i64,
    pub code: String,
}

#[derive(Debug)]
pub struct VerifyOtcOutput {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
    pub role: UserRole,
}

pub struct VerifyOtcUseCase<U, O>
where
    U: UserRepository,
    O: OneTimeCodeRepository,
{
    pub users: U,
    pub otcs: O,
    pub hasher: CredentialHasher,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
}

impl<U, O> VerifyOtcUseCase<U, O>
where
    U: UserRepository,
    O: OneTimeCodeRepository,
{
    /// Second factor. This is the only path that mints bearer tokens.
    pub async fn execute(&self, input: VerifyOtcInput) -> Result<VerifyOtcOutput, AuthServiceError> {
        let user = self
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let record = self
            .otcs
            .find_by_user(user.id)
            .await?
            .ok_or(AuthServiceError::OtcNotFound)?;

        // Lazy expiry cleanup: the expired row is removed on access.
        if record.is_expired() {
            self.otcs.delete_by_user(user.id).await?;
            return Err(AuthServiceError::OtcExpired);
        }

        // Mismatch leaves the record in place: retries are allowed until
        // the code expires.
        if !self.hasher.verify(&input.code, &record.code_hash).await? {
            return Err(AuthServiceError::InvalidOtc);
        }

        // Single use: consume before minting.
        self.otcs.delete_by_user(user.id).await?;

        let (access_token, access_token_exp) =
            issue_access_token(&user, &self.access_token_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.refresh_token_secret)?;

        Ok(VerifyOtcOutput {
            access_token,
            access_token_exp,
            refresh_token,
            role: user.role,
        })
    }
}
