use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum_extra::extract::CookieJar;
use maud::Markup;
use serde::Deserialize;

use super::config::GatewayConfig;
use super::cookies;
use super::error::GatewayError;
use super::extractor::AuthUser;
use super::pages;
use super::state::AppState;
use crate::session::SessionStore;
use crate::snowflake::decode_creation_time;

/// Create the login gateway router.
///
/// `store` is shared with the caller so sessions can be inspected or
/// seeded outside of request handling.
pub fn gateway_routes(config: GatewayConfig, store: Arc<SessionStore>) -> Router {
    let state = AppState {
        client: Arc::new(config.client),
        store,
        settings: config.settings,
    };

    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
        .with_state(state)
}

// ── Index ──────────────────────────────────────────────────────────

async fn index(State(state): State<AppState>, user: Option<AuthUser>) -> Markup {
    let Some(AuthUser { identity, .. }) = user else {
        return pages::landing();
    };

    let created_at = decode_creation_time(identity.id.as_str())
        .inspect_err(|e| {
            tracing::warn!(user_id = %identity.id, error = %e, "Undecodable user ID");
        })
        .ok();
    let first_login = state.store.first_login_time(&identity.id);

    pages::profile(&identity, created_at, first_login)
}

// ── Login ──────────────────────────────────────────────────────────

async fn login(State(state): State<AppState>) -> Response {
    found(&state.client.authorization_url())
}

// ── Callback ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Response), GatewayError> {
    if let Some(error) = &params.error {
        let desc = params.error_description.as_deref().unwrap_or("Unknown error");
        tracing::warn!(error = %error, description = %desc, "OAuth2 error from Discord");
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(GatewayError::MissingCode)?;

    let identity = state.client.exchange(&code).await?;
    let user_id = identity.id.clone();

    let token = state.store.create_session(identity);
    let session_cookie = cookies::session_cookie(&token, state.settings.secure_cookies);

    tracing::info!(user_id = %user_id, "Discord OAuth2 login successful");

    Ok((jar.add(session_cookie), found("/")))
}

// ── Logout ─────────────────────────────────────────────────────────

async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    if let Some(token) = cookies::get_session_token(&jar) {
        state.store.destroy(&token);
    }

    (jar.remove(cookies::clear_session_cookie()), found("/"))
}

// ── Helpers ────────────────────────────────────────────────────────

/// `302 Found`; axum's `Redirect` only offers 303/307/308.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
