use chrono::{DateTime, Utc};

use equiptrack_domain::user::UserRole;

/// User account record.
///
/// `password_hash` and the two `answer_*_hash` fields are bcrypt hashes of
/// the peppered secret; plaintext never appears here.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub security_question_1: String,
    pub answer_1_hash: String,
    pub security_question_2: String,
    pub answer_2_hash: String,
    pub role: UserRole,
    pub verified: bool,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a user. Role defaults to `user`, verified and
/// disabled to false; id and created_at are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub security_question_1: String,
    pub answer_1_hash: String,
    pub security_question_2: String,
    pub answer_2_hash: String,
}

/// Short-lived second factor. At most one live code per user; replaced
/// whenever a fresh code is issued.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub user_id: i64,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Email-ownership proof. The token string is a 256-bit random hex value.
#[derive(Debug, Clone)]
pub struct VerificationToken {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// One-time code time-to-live in minutes.
pub const OTC_TTL_MINUTES: i64 = 5;

/// Email-verification token time-to-live in hours.
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;
