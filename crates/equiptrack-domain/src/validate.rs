//! Registration field validation.
//!
//! Pure checks over borrowed input; the auth service maps a `false` to a
//! 400 with a field-specific message.

/// Username: alphanumeric ASCII, 3-50 characters.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (3..=50).contains(&len) && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Minimal RFC-style email shape check: exactly one `@`, non-empty local
/// part, domain with at least one dot and no leading/trailing dot, no
/// whitespace anywhere.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.len() >= 3
}

/// First/last name: alphabetic, 2-50 characters.
pub fn validate_name(name: &str) -> bool {
    let len = name.chars().count();
    (2..=50).contains(&len) && name.chars().all(char::is_alphabetic)
}

/// Password strength: at least 8 characters with an uppercase letter, a
/// lowercase letter, a digit, and a symbol.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

/// Security question: at least 10 characters.
pub fn validate_security_question(question: &str) -> bool {
    question.chars().count() >= 10
}

/// Security answer: at least 3 characters.
pub fn validate_security_answer(answer: &str) -> bool {
    answer.chars().count() >= 3
}
