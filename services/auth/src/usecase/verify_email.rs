use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::error::AuthServiceError;

pub struct VerifyEmailUseCase<U, V>
where
    U: UserRepository,
    V: VerificationTokenRepository,
{
    pub users: U,
    pub tokens: V,
}

impl<U, V> VerifyEmailUseCase<U, V>
where
    U: UserRepository,
    V: VerificationTokenRepository,
{
    pub async fn execute(&self, token: &str) -> Result<(), AuthServiceError> {
        let record = self
            .tokens
            .find_by_token(token)
            .await?
            .ok_or(AuthServiceError::InvalidVerificationToken)?;

        // Lazy cleanup: expired tokens are removed when touched, not by a
        // background sweep.
        if record.is_expired() {
            self.tokens.delete_by_token(token).await?;
            return Err(AuthServiceError::VerificationTokenExpired);
        }

        self.users.set_verified(record.user_id).await?;
        self.tokens.delete_by_token(token).await?;
        Ok(())
    }
}
