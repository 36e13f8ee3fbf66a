use chrono::{Duration, Utc};
use rand::RngExt;

use equiptrack_domain::validate::{
    validate_email, validate_name, validate_password, validate_security_answer,
    validate_security_question, validate_username,
};

use crate::domain::repository::{MailPort, UserRepository, VerificationTokenRepository};
use crate::domain::types::{NewUser, VERIFICATION_TOKEN_TTL_HOURS, VerificationToken};
use crate::error::AuthServiceError;
use crate::infra::hash::CredentialHasher;

/// 32 random bytes, hex-encoded: 256 bits of entropy, unguessable.
fn generate_verification_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub struct RegisterInput {
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

impl RegisterInput {
    fn validate(&self) -> Result<(), AuthServiceError> {
        let reject = |msg: &str| Err(AuthServiceError::Validation(msg.to_owned()));
        if !validate_username(&self.username) {
            return reject("username must be 3-50 alphanumeric characters");
        }
        if !validate_name(&self.first_name) {
            return reject("first name must be 2-50 alphabetic characters");
        }
        if !validate_name(&self.last_name) {
            return reject("last name must be 2-50 alphabetic characters");
        }
        if !validate_email(&self.email) {
            return reject("email is not well-formed");
        }
        if !validate_password(&self.password) {
            return reject(
                "password must be at least 8 characters with an uppercase letter, a lowercase letter, a digit, and a symbol",
            );
        }
        if !validate_security_question(&self.security_question_1)
            || !validate_security_question(&self.security_question_2)
        {
            return reject("security questions must be at least 10 characters");
        }
        if !validate_security_answer(&self.answer_1) || !validate_security_answer(&self.answer_2) {
            return reject("security answers must be at least 3 characters");
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: i64,
}

pub struct RegisterUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: MailPort,
{
    pub users: U,
    pub tokens: V,
    pub mail: M,
    pub hasher: CredentialHasher,
}

impl<U, V, M> RegisterUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: MailPort,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, AuthServiceError> {
        input.validate()?;

        // Pre-checks give friendly conflicts; the unique indexes close the
        // race window in `create`.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthServiceError::EmailTaken);
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(AuthServiceError::UsernameTaken);
        }

        // Password and both security answers share one salt.
        let salt: [u8; 16] = rand::rng().random();
        let password_hash = self.hasher.hash_with_salt(&input.password, salt).await?;
        let answer_1_hash = self.hasher.hash_with_salt(&input.answer_1, salt).await?;
        let answer_2_hash = self.hasher.hash_with_salt(&input.answer_2, salt).await?;

        let user_id = self
            .users
            .create(&NewUser {
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email.clone(),
                password_hash,
                security_question_1: input.security_question_1,
                answer_1_hash,
                security_question_2: input.security_question_2,
                answer_2_hash,
            })
            .await?;

        let now = Utc::now();
        let token = VerificationToken {
            token: generate_verification_token(),
            user_id,
            expires_at: now + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS),
            created_at: now,
        };
        self.tokens.create(&token).await?;

        // Mail failure surfaces as an internal error but does not roll back
        // the persisted user and token.
        self.mail
            .send_verification_email(&input.email, &token.token)
            .await?;

        Ok(RegisterOutput { user_id })
    }
}
