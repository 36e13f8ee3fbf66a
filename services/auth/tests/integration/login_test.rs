use equiptrack_auth::error::AuthServiceError;
use equiptrack_auth::usecase::login::{LoginInput, LoginUseCase};

use crate::helpers::{MockMailer, MockOtcRepo, MockUserRepo, TEST_PASSWORD, test_hasher, test_user};

fn usecase(
    users: MockUserRepo,
    otcs: MockOtcRepo,
    mail: MockMailer,
) -> LoginUseCase<MockUserRepo, MockOtcRepo, MockMailer> {
    LoginUseCase {
        users,
        otcs,
        mail,
        hasher: test_hasher(),
    }
}

#[tokio::test]
async fn should_issue_hashed_otc_without_minting_tokens() {
    let user = test_user(1).await;
    let otcs = MockOtcRepo::empty();
    let codes_handle = otcs.codes_handle();
    let mail = MockMailer::new();
    let usecase = usecase(MockUserRepo::new(vec![user.clone()]), otcs, mail.clone());

    let out = usecase
        .execute(LoginInput {
            email: user.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.user_id, user.id);

    // The stored record holds a hash; the plaintext went out by mail only.
    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1);
    let code = mail.last_secret();
    assert_eq!(code.len(), 6);
    assert_ne!(codes[0].code_hash, code);

    let hasher = test_hasher();
    assert!(hasher.verify(&code, &codes[0].code_hash).await.unwrap());
}

#[tokio::test]
async fn should_answer_identically_for_unknown_email_and_wrong_password() {
    let user = test_user(1).await;
    let usecase = usecase(
        MockUserRepo::new(vec![user.clone()]),
        MockOtcRepo::empty(),
        MockMailer::new(),
    );

    let unknown_email = usecase
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();
    let wrong_password = usecase
        .execute(LoginInput {
            email: user.email.clone(),
            password: "Wr0ng!pass".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(unknown_email, AuthServiceError::InvalidCredentials));
    assert!(matches!(wrong_password, AuthServiceError::InvalidCredentials));
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn should_reveal_disabled_status_only_with_correct_password() {
    let mut user = test_user(1).await;
    user.disabled = true;
    let usecase = usecase(
        MockUserRepo::new(vec![user.clone()]),
        MockOtcRepo::empty(),
        MockMailer::new(),
    );

    let wrong_password = usecase
        .execute(LoginInput {
            email: user.email.clone(),
            password: "Wr0ng!pass".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(wrong_password, AuthServiceError::InvalidCredentials));

    let correct_password = usecase
        .execute(LoginInput {
            email: user.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(correct_password, AuthServiceError::AccountDisabled));
}

#[tokio::test]
async fn should_replace_previous_code_on_second_login() {
    let user = test_user(1).await;
    let otcs = MockOtcRepo::empty();
    let codes_handle = otcs.codes_handle();
    let mail = MockMailer::new();
    let usecase = usecase(MockUserRepo::new(vec![user.clone()]), otcs, mail.clone());

    let input = || LoginInput {
        email: user.email.clone(),
        password: TEST_PASSWORD.to_owned(),
    };
    usecase.execute(input()).await.unwrap();
    let first_code = mail.last_secret();
    usecase.execute(input()).await.unwrap();
    let second_code = mail.last_secret();

    // Single live code per user: the first code is gone.
    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1);
    let hasher = test_hasher();
    assert!(hasher.verify(&second_code, &codes[0].code_hash).await.unwrap());
    if first_code != second_code {
        assert!(!hasher.verify(&first_code, &codes[0].code_hash).await.unwrap());
    }
}
