use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account disabled")]
    AccountDisabled,
    #[error("user not found")]
    UserNotFound,
    #[error("one-time code not found")]
    OtcNotFound,
    #[error("one-time code expired")]
    OtcExpired,
    #[error("invalid one-time code")]
    InvalidOtc,
    #[error("invalid verification token")]
    InvalidVerificationToken,
    #[error("verification token expired")]
    VerificationTokenExpired,
    #[error("authorization required")]
    TokenRequired,
    #[error("invalid token")]
    InvalidToken,
    #[error("refresh token required")]
    RefreshTokenRequired,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("insufficient permissions")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::OtcNotFound => "OTC_NOT_FOUND",
            Self::OtcExpired => "OTC_EXPIRED",
            Self::InvalidOtc => "INVALID_OTC",
            Self::InvalidVerificationToken => "INVALID_VERIFICATION_TOKEN",
            Self::VerificationTokenExpired => "VERIFICATION_TOKEN_EXPIRED",
            Self::TokenRequired => "TOKEN_REQUIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::RefreshTokenRequired => "REFRESH_TOKEN_REQUIRED",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_)
            | Self::OtcExpired
            | Self::InvalidOtc
            | Self::InvalidVerificationToken
            | Self::VerificationTokenExpired => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::TokenRequired | Self::RefreshTokenRequired => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountDisabled
            | Self::InvalidToken
            | Self::InvalidRefreshToken
            | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::OtcNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::UsernameTaken => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
