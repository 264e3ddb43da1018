use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

use crate::error::Error;
use crate::oauth::{AuthClient, OAuthConfig};

/// Config file read when `GATEWAY_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.json5";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Runtime settings shared by the route handlers.
#[derive(Clone)]
pub(crate) struct GatewaySettings {
    pub(crate) secure_cookies: bool,
}

impl GatewaySettings {
    fn defaults() -> Self {
        Self {
            secure_cookies: false,
        }
    }
}

/// On-disk shape of `config.json5`.
#[derive(Deserialize)]
struct FileConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: Url,
    #[serde(default)]
    auth_url: Option<Url>,
    #[serde(default)]
    token_url: Option<Url>,
    #[serde(default)]
    userinfo_url: Option<Url>,
    #[serde(default = "default_listen_addr")]
    listen_addr: SocketAddr,
    #[serde(default)]
    secure_cookies: bool,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_listen_addr() -> SocketAddr {
    DEFAULT_LISTEN_ADDR.parse().expect("valid default address")
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Login gateway configuration.
///
/// Required field (`client`) is a constructor parameter.
///
/// Use [`load()`](GatewayConfig::load) to read `config.json5` at startup,
/// or [`new()`](GatewayConfig::new) with `with_*` methods for full control.
pub struct GatewayConfig {
    pub(super) client: AuthClient,
    pub(super) settings: GatewaySettings,
    pub(super) listen_addr: SocketAddr,
}

impl GatewayConfig {
    #[must_use]
    pub fn new(client: AuthClient) -> Self {
        Self {
            client,
            settings: GatewaySettings::defaults(),
            listen_addr: default_listen_addr(),
        }
    }

    /// Load from the file named by `GATEWAY_CONFIG`, or `config.json5`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is unreadable or malformed.
    pub fn load() -> Result<Self, Error> {
        let path =
            std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(path)
    }

    /// Load from a JSON5 file.
    ///
    /// # Required keys
    /// - `client_id`, `client_secret`: OAuth2 application credentials
    /// - `redirect_uri`: OAuth2 callback URI (must be a valid URL)
    ///
    /// # Optional keys
    /// - `auth_url`, `token_url`, `userinfo_url`: override provider endpoints
    /// - `listen_addr`: socket to bind (default `0.0.0.0:8080`)
    /// - `secure_cookies`: mark the session cookie `Secure` (default `false`)
    /// - `request_timeout_secs`: bound on each outbound request (default 10)
    ///
    /// Every key can be overridden with a `GATEWAY_`-prefixed environment
    /// variable, e.g. `GATEWAY_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is missing, unreadable or
    /// malformed, or a required key is absent.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file: FileConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json5).required(true))
            .add_source(Environment::with_prefix("GATEWAY").try_parsing(true))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        Ok(Self::from_file_config(file))
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    #[must_use]
    pub fn oauth(&self) -> &OAuthConfig {
        self.client.config()
    }

    fn from_file_config(file: FileConfig) -> Self {
        let mut oauth = OAuthConfig::new(file.client_id, file.client_secret, file.redirect_uri)
            .with_timeout(Duration::from_secs(file.request_timeout_secs));
        if let Some(url) = file.auth_url {
            oauth = oauth.with_auth_url(url);
        }
        if let Some(url) = file.token_url {
            oauth = oauth.with_token_url(url);
        }
        if let Some(url) = file.userinfo_url {
            oauth = oauth.with_userinfo_url(url);
        }

        Self::new(AuthClient::new(oauth))
            .with_listen_addr(file.listen_addr)
            .with_secure_cookies(file.secure_cookies)
    }
}
