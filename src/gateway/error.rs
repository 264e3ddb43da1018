use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::pages;

/// Errors surfaced by the gateway's route handlers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Callback reached without an authorization code.
    #[error("Authorization code not found")]
    MissingCode,

    /// Token exchange or profile fetch against the provider failed.
    #[error("Login failed: {0}")]
    Exchange(#[from] crate::error::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingCode => (
                StatusCode::BAD_REQUEST,
                pages::error_page("The login request is missing its authorization code."),
            )
                .into_response(),
            Self::Exchange(ref e) => {
                tracing::error!(error = %e, "Login exchange failed");
                (
                    StatusCode::BAD_GATEWAY,
                    pages::error_page("Could not complete login with Discord. Please try again."),
                )
                    .into_response()
            }
        }
    }
}
