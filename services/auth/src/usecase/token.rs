use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use equiptrack_auth_types::cookie::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use equiptrack_auth_types::token::{JwtClaims, validate_refresh_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::AuthServiceError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn issue_token(user: &User, secret: &str, ttl_secs: u64) -> Result<(String, u64), AuthServiceError> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.as_str().to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Mint a short-lived access token signed with the access secret.
pub fn issue_access_token(
    user: &User,
    access_secret: &str,
) -> Result<(String, u64), AuthServiceError> {
    issue_token(user, access_secret, ACCESS_TOKEN_EXP)
}

/// Mint a long-lived refresh token signed with the refresh secret.
pub fn issue_refresh_token(user: &User, refresh_secret: &str) -> Result<String, AuthServiceError> {
    issue_token(user, refresh_secret, REFRESH_TOKEN_EXP).map(|(token, _)| token)
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    /// Issue a fresh access token from a valid refresh token. The refresh
    /// token is not rotated; the role comes from the user store, not from
    /// the old claims, so a role change takes effect on the next refresh.
    pub async fn execute(
        &self,
        refresh_token_value: &str,
    ) -> Result<RefreshTokenOutput, AuthServiceError> {
        let info = validate_refresh_token(refresh_token_value, &self.refresh_token_secret)
            .map_err(|_| AuthServiceError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or(AuthServiceError::InvalidRefreshToken)?;

        if user.disabled {
            return Err(AuthServiceError::InvalidRefreshToken);
        }

        let (access_token, access_token_exp) =
            issue_access_token(&user, &self.access_token_secret)?;

        Ok(RefreshTokenOutput {
            access_token,
            access_token_exp,
        })
    }
}
