#![allow(async_fn_in_trait)]

use equiptrack_domain::user::UserRole;

use crate::domain::types::{NewUser, OneTimeCode, User, VerificationToken};
use crate::error::AuthServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its id. Fails with `EmailTaken` /
    /// `UsernameTaken` when a unique constraint rejects the write.
    async fn create(&self, user: &NewUser) -> Result<i64, AuthServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthServiceError>;

    async fn list(&self) -> Result<Vec<User>, AuthServiceError>;

    /// Partial update: role column only.
    async fn set_role(&self, id: i64, role: UserRole) -> Result<(), AuthServiceError>;

    /// Partial update: verified column only. Flips once, never back.
    async fn set_verified(&self, id: i64) -> Result<(), AuthServiceError>;

    /// Partial update: disabled column only.
    async fn set_disabled(&self, id: i64, disabled: bool) -> Result<(), AuthServiceError>;
}

/// Repository for one-time second-factor codes.
pub trait OneTimeCodeRepository: Send + Sync {
    /// Insert a code for a user, replacing any previous one (single live
    /// code per user).
    async fn replace(&self, code: &OneTimeCode) -> Result<(), AuthServiceError>;

    async fn find_by_user(&self, user_id: i64) -> Result<Option<OneTimeCode>, AuthServiceError>;

    /// Delete unconditionally: after successful verification or on
    /// detecting expiry during a verify attempt.
    async fn delete_by_user(&self, user_id: i64) -> Result<(), AuthServiceError>;
}

/// Repository for email-verification tokens.
pub trait VerificationTokenRepository: Send + Sync {
    async fn create(&self, token: &VerificationToken) -> Result<(), AuthServiceError>;

    async fn find_by_token(&self, token: &str)
    -> Result<Option<VerificationToken>, AuthServiceError>;

    async fn delete_by_token(&self, token: &str) -> Result<(), AuthServiceError>;
}

/// Port for outgoing mail. Dispatch failure is surfaced as an internal
/// error; already-persisted token/code rows are not rolled back.
pub trait MailPort: Send + Sync {
    async fn send_verification_email(&self, to: &str, token: &str)
    -> Result<(), AuthServiceError>;

    async fn send_one_time_code_email(&self, to: &str, code: &str)
    -> Result<(), AuthServiceError>;
}
