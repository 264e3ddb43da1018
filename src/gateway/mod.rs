//! Axum routes for the Discord login flow.
//!
//! Serves the landing/profile page, `/login`, `/callback` and `/logout`
//! on top of [`AuthClient`](crate::oauth::AuthClient) and
//! [`SessionStore`](crate::session::SessionStore).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use discord_login_gateway::gateway::{GatewayConfig, gateway_routes};
//! use discord_login_gateway::SessionStore;
//!
//! let config = GatewayConfig::load()?;
//! let addr = config.listen_addr();
//! let app = gateway_routes(config, Arc::new(SessionStore::new()));
//!
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! ```

mod config;
mod cookies;
mod error;
mod extractor;
mod pages;
mod routes;
mod state;

pub use config::{DEFAULT_CONFIG_PATH, GatewayConfig};
pub use error::GatewayError;
pub use extractor::AuthUser;
pub use routes::gateway_routes;
