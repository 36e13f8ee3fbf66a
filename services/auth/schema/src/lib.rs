//! Sea-orm entities for the auth service database.

pub mod email_verification_tokens;
pub mod one_time_codes;
pub mod users;
