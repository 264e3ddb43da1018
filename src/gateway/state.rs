use std::sync::Arc;

use super::config::GatewaySettings;
use crate::oauth::AuthClient;
use crate::session::SessionStore;

/// Shared state for route handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) client: Arc<AuthClient>,
    pub(crate) store: Arc<SessionStore>,
    pub(crate) settings: GatewaySettings,
}
