//! Refresh-token cookie builders.
//!
//! The refresh token is the only credential kept in a cookie: HTTP-only,
//! SameSite Lax, path-scoped to `/auth` so it travels only to the refresh
//! and logout endpoints. The `Secure` attribute is tied to production mode.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the refresh token.
pub const EQUIPTRACK_REFRESH_TOKEN: &str = "equiptrack_refresh_token";

/// Access-token JWT lifetime in seconds (15 minutes).
pub const ACCESS_TOKEN_EXP: u64 = 900;

/// Refresh-token JWT lifetime and cookie Max-Age in seconds (7 days).
pub const REFRESH_TOKEN_EXP: u64 = 604800;

/// Set the refresh-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use equiptrack_auth_types::cookie::{set_refresh_token_cookie, EQUIPTRACK_REFRESH_TOKEN};
///
/// let jar = CookieJar::new();
/// let jar = set_refresh_token_cookie(jar, "refresh_value".to_string(), true);
/// let cookie = jar.get(EQUIPTRACK_REFRESH_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/auth"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_refresh_token_cookie(jar: CookieJar, value: String, secure: bool) -> CookieJar {
    let cookie = Cookie::build((EQUIPTRACK_REFRESH_TOKEN, value))
        .path("/auth")
        .max_age(Duration::seconds(REFRESH_TOKEN_EXP as i64))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the refresh-token cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use equiptrack_auth_types::cookie::{
///     clear_refresh_token_cookie, set_refresh_token_cookie, EQUIPTRACK_REFRESH_TOKEN,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_refresh_token_cookie(jar, "r".to_string(), false);
/// let jar = clear_refresh_token_cookie(jar, false);
/// let cookie = jar.get(EQUIPTRACK_REFRESH_TOKEN).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_refresh_token_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((EQUIPTRACK_REFRESH_TOKEN, ""))
        .path("/auth")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
