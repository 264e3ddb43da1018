use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::types::SessionToken;

pub(crate) const SESSION_COOKIE_NAME: &str = "session";

/// Create session cookie.
///
/// No `Max-Age`: the browser drops it on close, the server keeps the
/// session until logout.
pub(super) fn session_cookie(token: &SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Create removal cookie for session.
pub(super) fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build()
}

/// Get the session token from cookies.
pub(super) fn get_session_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
        .map(|v| SessionToken(v.to_string()))
}
