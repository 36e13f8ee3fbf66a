use chrono::{Duration, Utc};

use equiptrack_auth::domain::types::VerificationToken;
use equiptrack_auth::error::AuthServiceError;
use equiptrack_auth::usecase::verify_email::VerifyEmailUseCase;

use crate::helpers::{MockTokenRepo, MockUserRepo, test_user};

fn token_for(user_id: i64, expires_in: Duration) -> VerificationToken {
    VerificationToken {
        token: "aa".repeat(32),
        user_id,
        expires_at: Utc::now() + expires_in,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn should_mark_user_verified_and_consume_token() {
    let mut user = test_user(1).await;
    user.verified = false;

    let users = MockUserRepo::new(vec![user]);
    let users_handle = users.users_handle();
    let tokens = MockTokenRepo::new(vec![token_for(1, Duration::hours(24))]);
    let tokens_handle = tokens.tokens_handle();

    let usecase = VerifyEmailUseCase { users, tokens };
    usecase.execute(&"aa".repeat(32)).await.unwrap();

    assert!(users_handle.lock().unwrap()[0].verified);
    // Consumed on success: a second attempt must not find it.
    assert!(tokens_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_token() {
    let usecase = VerifyEmailUseCase {
        users: MockUserRepo::empty(),
        tokens: MockTokenRepo::empty(),
    };

    let result = usecase.execute("deadbeef").await;
    assert!(matches!(
        result,
        Err(AuthServiceError::InvalidVerificationToken)
    ));
}

#[tokio::test]
async fn should_delete_expired_token_and_leave_user_unverified() {
    let mut user = test_user(1).await;
    user.verified = false;

    let users = MockUserRepo::new(vec![user]);
    let users_handle = users.users_handle();
    let tokens = MockTokenRepo::new(vec![token_for(1, Duration::hours(-1))]);
    let tokens_handle = tokens.tokens_handle();

    let usecase = VerifyEmailUseCase { users, tokens };
    let result = usecase.execute(&"aa".repeat(32)).await;

    assert!(matches!(
        result,
        Err(AuthServiceError::VerificationTokenExpired)
    ));
    // Lazy cleanup removed the expired row.
    assert!(tokens_handle.lock().unwrap().is_empty());
    assert!(!users_handle.lock().unwrap()[0].verified);
}
