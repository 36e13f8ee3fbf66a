use crate::domain::repository::{MailPort, OneTimeCodeRepository, UserRepository};
use crate::error::AuthServiceError;
use crate::infra::hash::CredentialHasher;
use crate::usecase::otc::issue_code;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: i64,
}

pub struct LoginUseCase<U, O, M>
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

impl<U, O, M> LoginUseCase<U, O, M>
where
    U: UserRepository,
    O: OneTimeCodeRepository,
    M: MailPort,
{
    /// First factor. Success does not mint tokens: it issues a one-time
    /// code and hands back the user id for the verify step.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AuthServiceError> {
        // Unknown email and wrong password answer identically, so the
        // response never confirms whether an address is registered.
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !self
            .hasher
            .verify(&input.password, &user.password_hash)
            .await?
        {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // Checked after the credential so the disabled status is revealed
        // only to someone who holds the password.
        if user.disabled {
            return Err(AuthServiceError::AccountDisabled);
        }

        issue_code(&self.otcs, &self.mail, &self.hasher, &user).await?;

        Ok(LoginOutput { user_id: user.id })
    }
}
