//! JWT validation for access and refresh tokens.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
use serde::Serialize;

use equiptrack_domain::user::UserRole;

/// User identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token creation (auth service) and validation
/// (everything else).
///
/// # Fields
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | numeric user id as string | user ID |
/// | `email` | custom | `String` | user email at issuance time |
/// | `role` | custom | wire string, see [`UserRole`] | role at issuance time |
/// | `exp` | `exp` | seconds since epoch | token expiration |
///
/// # Feature gate
///
/// [`Deserialize`] is always available — all consumers validate tokens.
/// [`Serialize`] requires the **`USE_ONLY_IN_AUTH_SERVICE`** cargo feature.
/// Only the auth service enables it because it is the sole token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    /// User ID (decimal string).
    pub sub: String,
    /// User email.
    pub email: String,
    /// User role wire string.
    pub role: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

impl TokenInfo {
    /// Build typed identity from raw claims, failing closed: a payload whose
    /// `sub` is not a numeric id or whose `role` is unknown is rejected even
    /// when the signature checked out.
    fn from_claims(claims: JwtClaims) -> Result<Self, AuthError> {
        let user_id = claims.sub.parse::<i64>().map_err(|_| AuthError::Malformed)?;
        let role = UserRole::from_str(&claims.role).ok_or(AuthError::Malformed)?;
        Ok(Self {
            user_id,
            email: claims.email,
            role,
            exp: claims.exp,
        })
    }
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between services.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer access token against the access-token secret.
///
/// This is the primary public API for token validation: the auth middleware
/// calls it on every protected request.
pub fn validate_access_token(token: &str, access_secret: &str) -> Result<TokenInfo, AuthError> {
    decode_jwt(token, access_secret).and_then(TokenInfo::from_claims)
}

/// Validate a refresh-token cookie value against the refresh-token secret.
///
/// Access and refresh tokens are signed with distinct secrets, so a token
/// issued for one purpose never validates for the other.
pub fn validate_refresh_token(token: &str, refresh_secret: &str) -> Result<TokenInfo, AuthError> {
    decode_jwt(token, refresh_secret).and_then(TokenInfo::from_claims)
}
