use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::types::UserId;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Discord `OAuth2` configuration.
///
/// Required fields are constructor parameters — no runtime "missing field" errors.
///
/// ```rust,ignore
/// use discord_login_gateway::OAuthConfig;
///
/// let config = OAuthConfig::new("my-client-id", "s3cret", "https://my-app.com/callback".parse()?);
/// // Optional overrides via chaining:
/// let config = config
///     .with_token_url("http://127.0.0.1:9999/token".parse()?);
/// ```
#[derive(Clone)]
#[non_exhaustive]
pub struct OAuthConfig {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) auth_url: Url,
    pub(crate) token_url: Url,
    pub(crate) userinfo_url: Url,
    pub(crate) redirect_uri: Url,
    pub(crate) scopes: Vec<String>,
    pub(crate) timeout: Duration,
}

impl OAuthConfig {
    /// Create a new OAuth2 configuration pointing at Discord.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: Url,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri,
            auth_url: "https://discord.com/api/oauth2/authorize"
                .parse()
                .expect("valid default URL"),
            token_url: "https://discord.com/api/oauth2/token"
                .parse()
                .expect("valid default URL"),
            userinfo_url: "https://discord.com/api/users/@me"
                .parse()
                .expect("valid default URL"),
            scopes: vec!["identify".into(), "guilds".into()],
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: Url) -> Self {
        self.auth_url = url;
        self
    }

    /// Override the token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    /// Override the user profile endpoint.
    #[must_use]
    pub fn with_userinfo_url(mut self, url: Url) -> Self {
        self.userinfo_url = url;
        self
    }

    /// Override the OAuth2 scopes (default: `["identify", "guilds"]`).
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Bound each outbound request (default: 10 seconds).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    #[must_use]
    pub fn userinfo_url(&self) -> &Url {
        &self.userinfo_url
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("userinfo_url", &self.userinfo_url.as_str())
            .field("redirect_uri", &self.redirect_uri.as_str())
            .field("scopes", &self.scopes)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `OAuth2` authorization-code client for Discord.
pub struct AuthClient {
    config: OAuthConfig,
    http: reqwest::Client,
}

/// Token response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    pub access_token: String,
}

/// Profile snapshot returned by the user endpoint at login time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Identity {
    pub id: UserId,
    #[serde(rename = "username")]
    pub display_name: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(rename = "avatar", default)]
    pub avatar_hash: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            discriminator: String::new(),
            avatar_hash: None,
        }
    }

    #[must_use]
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = discriminator.into();
        self
    }

    #[must_use]
    pub fn with_avatar_hash(mut self, avatar_hash: impl Into<String>) -> Self {
        self.avatar_hash = Some(avatar_hash.into());
        self
    }

    /// CDN URL of the avatar image, if the user has one.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar_hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .map(|hash| format!("https://cdn.discordapp.com/avatars/{}/{hash}.png", self.id))
    }
}

impl AuthClient {
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Authorization endpoint URL the visitor is redirected to.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        let scope = self.config.scopes.join(" ");

        let mut url = self.config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", self.config.redirect_uri.as_str())
            .append_pair("response_type", "code")
            .append_pair("scope", &scope);

        url.into()
    }

    /// Runs the full code → token → profile sequence.
    ///
    /// # Errors
    ///
    /// See [`exchange_code`](Self::exchange_code) and
    /// [`get_user_info`](Self::get_user_info). The profile endpoint is not
    /// contacted when the token exchange fails.
    pub async fn exchange(&self, code: &str) -> Result<Identity, Error> {
        let token = self.exchange_code(code).await?;
        self.get_user_info(&token.access_token).await
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenExchangeFailed`] on network failure, timeout or a
    /// non-2xx status, and [`Error::MalformedResponse`] if the body is not the
    /// expected JSON.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .timeout(self.config.timeout)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::TokenExchangeFailed(e.to_string()))?;

        let body = Self::success_body(response, Error::TokenExchangeFailed).await?;
        Self::decode(&body, "token exchange")
    }

    /// Fetch the profile of the user owning `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfileFetchFailed`] on network failure, timeout or a
    /// non-2xx status, and [`Error::MalformedResponse`] if the body is not the
    /// expected JSON.
    pub async fn get_user_info(&self, access_token: &str) -> Result<Identity, Error> {
        let response = self
            .http
            .get(self.config.userinfo_url.clone())
            .timeout(self.config.timeout)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::ProfileFetchFailed(e.to_string()))?;

        let body = Self::success_body(response, Error::ProfileFetchFailed).await?;
        Self::decode(&body, "profile fetch")
    }

    /// Checks the HTTP status and reads the body; failures go through `fail`.
    async fn success_body(
        response: reqwest::Response,
        fail: fn(String) -> Error,
    ) -> Result<bytes::Bytes, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fail(format!("status {status}: {body}")));
        }
        response.bytes().await.map_err(|e| fail(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(body: &[u8], operation: &'static str) -> Result<T, Error> {
        serde_json::from_slice(body).map_err(|e| Error::MalformedResponse {
            operation,
            detail: e.to_string(),
        })
    }
}
