#![doc = include_str!("../README.md")]

pub mod error;
pub mod gateway;
pub mod oauth;
pub mod session;
pub mod snowflake;
pub mod token;
pub mod types;

// Re-exports for convenient access
pub use error::Error;
pub use oauth::{AuthClient, Identity, OAuthConfig, TokenResponse};
pub use session::SessionStore;
pub use snowflake::{DISCORD_EPOCH_MS, Snowflake, decode_creation_time};
pub use token::generate_session_token;
pub use types::{SessionToken, UserId};
