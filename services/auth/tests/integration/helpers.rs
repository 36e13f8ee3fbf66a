use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use equiptrack_auth::domain::repository::{
    MailPort, OneTimeCodeRepository, UserRepository, VerificationTokenRepository,
};
use equiptrack_auth::domain::types::{NewUser, OneTimeCode, User, VerificationToken};
use equiptrack_auth::error::AuthServiceError;
use equiptrack_auth::infra::email::SmtpMailer;
use equiptrack_auth::infra::hash::CredentialHasher;
use equiptrack_auth::state::AppState;
use equiptrack_domain::user::UserRole;

pub const TEST_ACCESS_SECRET: &str = "test-access-secret-for-tests-only";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret-for-tests-only";
pub const TEST_PASSWORD: &str = "Str0ng!pw";

// Minimum bcrypt cost, to keep the tests fast.
pub fn test_hasher() -> CredentialHasher {
    CredentialHasher {
        cost: 4,
        pepper: "test-pepper".to_owned(),
    }
}

/// A verified, enabled user whose password is [`TEST_PASSWORD`].
pub async fn test_user(id: i64) -> User {
    let hasher = test_hasher();
    let password_hash = hasher.hash(TEST_PASSWORD).await.unwrap();
    let answer_hash = hasher.hash("Rex").await.unwrap();
    User {
        id,
        username: format!("user{id}"),
        first_name: "Alice".to_owned(),
        last_name: "Smith".to_owned(),
        email: format!("user{id}@example.com"),
        password_hash,
        security_question_1: "What was your first pet's name?".to_owned(),
        answer_1_hash: answer_hash.clone(),
        security_question_2: "What city were you born in?".to_owned(),
        answer_2_hash: answer_hash,
        role: UserRole::User,
        verified: true,
        disabled: false,
        created_at: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        let next = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: Arc::new(Mutex::new(users)),
            next_id: Arc::new(AtomicI64::new(next)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn create(&self, user: &NewUser) -> Result<i64, AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthServiceError::EmailTaken);
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthServiceError::UsernameTaken);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.push(User {
            id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            security_question_1: user.security_question_1.clone(),
            answer_1_hash: user.answer_1_hash.clone(),
            security_question_2: user.security_question_2.clone(),
            answer_2_hash: user.answer_2_hash.clone(),
            role: UserRole::default(),
            verified: false,
            disabled: false,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AuthServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn set_role(&self, id: i64, role: UserRole) -> Result<(), AuthServiceError> {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.role = role;
        }
        Ok(())
    }

    async fn set_verified(&self, id: i64) -> Result<(), AuthServiceError> {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.verified = true;
        }
        Ok(())
    }

    async fn set_disabled(&self, id: i64, disabled: bool) -> Result<(), AuthServiceError> {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.disabled = disabled;
        }
        Ok(())
    }
}

// ── MockOtcRepo ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOtcRepo {
    pub codes: Arc<Mutex<Vec<OneTimeCode>>>,
}

impl MockOtcRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn codes_handle(&self) -> Arc<Mutex<Vec<OneTimeCode>>> {
        Arc::clone(&self.codes)
    }
}

impl OneTimeCodeRepository for MockOtcRepo {
    async fn replace(&self, code: &OneTimeCode) -> Result<(), AuthServiceError> {
        let mut codes = self.codes.lock().unwrap();
        codes.retain(|c| c.user_id != code.user_id);
        codes.push(code.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<OneTimeCode>, AuthServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<(), AuthServiceError> {
        self.codes.lock().unwrap().retain(|c| c.user_id != user_id);
        Ok(())
    }
}

// ── MockTokenRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockTokenRepo {
    pub tokens: Arc<Mutex<Vec<VerificationToken>>>,
}

impl MockTokenRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(tokens: Vec<VerificationToken>) -> Self {
        Self {
            tokens: Arc::new(Mutex::new(tokens)),
        }
    }

    pub fn tokens_handle(&self) -> Arc<Mutex<Vec<VerificationToken>>> {
        Arc::clone(&self.tokens)
    }
}

impl VerificationTokenRepository for MockTokenRepo {
    async fn create(&self, token: &VerificationToken) -> Result<(), AuthServiceError> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<VerificationToken>, AuthServiceError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AuthServiceError> {
        self.tokens.lock().unwrap().retain(|t| t.token != token);
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    /// The plaintext verification token or one-time code carried in the mail.
    pub secret: String,
}

#[derive(Clone, Default)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_secret(&self) -> String {
        self.sent
            .lock()
            .unwrap()
            .last()
            .expect("no mail sent")
            .secret
            .clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl MailPort for MockMailer {
    async fn send_verification_email(
        &self,
        to: &str,
        token: &str,
    ) -> Result<(), AuthServiceError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            secret: token.to_owned(),
        });
        Ok(())
    }

    async fn send_one_time_code_email(
        &self,
        to: &str,
        code: &str,
    ) -> Result<(), AuthServiceError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            secret: code.to_owned(),
        });
        Ok(())
    }
}

// ── HTTP-level fixtures ──────────────────────────────────────────────────────

/// State for routing tests: no live database behind it, so only routes that
/// never touch the store may be exercised.
pub fn test_state() -> AppState {
    AppState {
        db: sea_orm::DatabaseConnection::Disconnected,
        access_token_secret: TEST_ACCESS_SECRET.to_owned(),
        refresh_token_secret: TEST_REFRESH_SECRET.to_owned(),
        hasher: test_hasher(),
        mailer: SmtpMailer::localhost("http://localhost:3000", "Equiptrack <noreply@example.com>")
            .unwrap(),
        production: false,
    }
}
