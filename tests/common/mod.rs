#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use discord_login_gateway::gateway::{GatewayConfig, gateway_routes};
use discord_login_gateway::{AuthClient, OAuthConfig, SessionStore};
use parking_lot::Mutex;
use tokio::net::TcpListener;
use url::Url;

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const USER_ID: &str = "80351110224678912";

pub fn token_json() -> String {
    format!(r#"{{"access_token":"{ACCESS_TOKEN}","token_type":"Bearer","expires_in":604800}}"#)
}

pub fn profile_json() -> String {
    format!(
        r#"{{"id":"{USER_ID}","username":"Nelly","discriminator":"1337","avatar":"8342729096ea3675442027381ff50dfe"}}"#
    )
}

pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    addr
}

/// Canned response from one fake provider endpoint.
#[derive(Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// What the fake provider observed.
#[derive(Default)]
pub struct ProviderCalls {
    pub token: AtomicUsize,
    pub profile: AtomicUsize,
    pub last_form: Mutex<Option<HashMap<String, String>>>,
    pub last_authorization: Mutex<Option<String>>,
}

impl ProviderCalls {
    pub fn token_calls(&self) -> usize {
        self.token.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile.load(Ordering::SeqCst)
    }
}

struct ProviderState {
    calls: Arc<ProviderCalls>,
    token: Reply,
    profile: Reply,
}

/// Local stand-in for Discord's token and profile endpoints.
pub struct FakeProvider {
    pub base: Url,
    pub calls: Arc<ProviderCalls>,
}

impl FakeProvider {
    pub async fn start(token: Reply, profile: Reply) -> Self {
        let calls = Arc::new(ProviderCalls::default());
        let state = Arc::new(ProviderState {
            calls: calls.clone(),
            token,
            profile,
        });

        let router = Router::new()
            .route("/oauth2/token", post(token_endpoint))
            .route("/users/@me", get(profile_endpoint))
            .with_state(state);

        let addr = serve(router).await;
        Self {
            base: format!("http://{addr}/").parse().unwrap(),
            calls,
        }
    }

    pub async fn healthy() -> Self {
        Self::start(Reply::ok(token_json()), Reply::ok(profile_json())).await
    }

    pub fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig::new(
            "test-client",
            "test-secret",
            "http://localhost:8080/callback".parse().unwrap(),
        )
        .with_auth_url(self.base.join("oauth2/authorize").unwrap())
        .with_token_url(self.base.join("oauth2/token").unwrap())
        .with_userinfo_url(self.base.join("users/@me").unwrap())
    }
}

async fn token_endpoint(
    State(state): State<Arc<ProviderState>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.calls.token.fetch_add(1, Ordering::SeqCst);
    *state.calls.last_form.lock() = Some(form);
    tokio::time::sleep(state.token.delay).await;
    (state.token.status, state.token.body.clone())
}

async fn profile_endpoint(
    State(state): State<Arc<ProviderState>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    state.calls.profile.fetch_add(1, Ordering::SeqCst);
    *state.calls.last_authorization.lock() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    tokio::time::sleep(state.profile.delay).await;
    (state.profile.status, state.profile.body.clone())
}

/// Gateway served on a random local port, talking to a [`FakeProvider`].
pub struct TestGateway {
    pub base: Url,
    pub store: Arc<SessionStore>,
    http: reqwest::Client,
}

impl TestGateway {
    pub async fn start(provider: &FakeProvider) -> Self {
        let store = Arc::new(SessionStore::new());
        let config = GatewayConfig::new(AuthClient::new(provider.oauth_config()));
        let addr = serve(gateway_routes(config, store.clone())).await;

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            base: format!("http://{addr}/").parse().unwrap(),
            store,
            http,
        }
    }

    pub async fn get(&self, path: &str, session: Option<&str>) -> reqwest::Response {
        let mut req = self.http.get(self.base.join(path).unwrap());
        if let Some(token) = session {
            req = req.header("cookie", format!("session={token}"));
        }
        req.send().await.unwrap()
    }

    /// Runs the callback and returns the issued session token.
    pub async fn login(&self, code: &str) -> String {
        let resp = self.get(&format!("callback?code={code}"), None).await;
        assert_eq!(resp.status(), 302);
        session_cookie_value(&resp).expect("callback should set the session cookie")
    }
}

pub fn set_cookie_headers(resp: &reqwest::Response) -> Vec<String> {
    resp.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_owned)
        .collect()
}

pub fn session_cookie_value(resp: &reqwest::Response) -> Option<String> {
    set_cookie_headers(resp).iter().find_map(|h| {
        h.strip_prefix("session=")
            .and_then(|rest| rest.split(';').next())
            .map(str::to_owned)
    })
}
