use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Provider user identifier (decimal snowflake string).
///
/// Kept as the provider sent it; decode with
/// [`decode_creation_time`](crate::snowflake::decode_creation_time) when the
/// creation time is needed.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque session token carried in the `session` cookie.
///
/// Issued by [`SessionStore::create_session`](crate::session::SessionStore::create_session).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl SessionToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
