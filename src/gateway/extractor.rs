use std::convert::Infallible;

use axum::extract::OptionalFromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use super::cookies;
use super::state::AppState;
use crate::oauth::Identity;
use crate::types::SessionToken;

/// Signed-in visitor resolved from the `session` cookie.
///
/// Use as `Option<AuthUser>` in handlers that serve both signed-in and
/// anonymous visitors; a missing, empty or unknown cookie yields `None`.
///
/// # Example
///
/// ```rust,ignore
/// async fn page(user: Option<AuthUser>) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}", u.identity.display_name),
///         None => "Hello, guest".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Session token (from cookie).
    pub token: SessionToken,
    /// Identity captured at login.
    pub identity: Identity,
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(cookies::get_session_token(&jar).and_then(|token| {
            state
                .store
                .lookup(&token)
                .map(|identity| AuthUser { token, identity })
        }))
    }
}
