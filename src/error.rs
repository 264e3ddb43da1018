#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),
    #[error("Profile fetch failed: {0}")]
    ProfileFetchFailed(String),
    #[error("Malformed response from {operation}: {detail}")]
    MalformedResponse {
        operation: &'static str,
        detail: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}
