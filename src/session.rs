use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::oauth::Identity;
use crate::token::generate_session_token;
use crate::types::{SessionToken, UserId};

/// In-memory session state shared by all request handlers.
///
/// Holds two maps for the lifetime of the process: live sessions
/// (token → identity) and first logins (user ID → first-seen time).
/// Sessions never expire; they end at logout or process exit.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionToken, Identity>>,
    first_logins: RwLock<HashMap<UserId, OffsetDateTime>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `identity` and remember it.
    ///
    /// The first call for a given user ID also records the current time as
    /// that user's first login; later calls leave it untouched.
    pub fn create_session(&self, identity: Identity) -> SessionToken {
        let user_id = identity.id.clone();

        let token = {
            let mut sessions = self.sessions.write();
            loop {
                let token = generate_session_token();
                if let Entry::Vacant(slot) = sessions.entry(token.clone()) {
                    slot.insert(identity);
                    break token;
                }
            }
        };

        self.record_first_login(user_id, OffsetDateTime::now_utc());
        token
    }

    /// Identity behind `token`, if the session is live.
    #[must_use]
    pub fn lookup(&self, token: &SessionToken) -> Option<Identity> {
        self.sessions.read().get(token).cloned()
    }

    /// End the session. Unknown tokens are ignored.
    pub fn destroy(&self, token: &SessionToken) {
        self.sessions.write().remove(token);
    }

    #[must_use]
    pub fn first_login_time(&self, user_id: &UserId) -> Option<OffsetDateTime> {
        self.first_logins.read().get(user_id).copied()
    }

    #[must_use]
    pub fn live_sessions(&self) -> usize {
        self.sessions.read().len()
    }

    fn record_first_login(&self, user_id: UserId, at: OffsetDateTime) {
        let mut first_logins = self.first_logins.write();
        if let Entry::Vacant(slot) = first_logins.entry(user_id) {
            tracing::debug!(user_id = %slot.key(), "First login recorded");
            slot.insert(at);
        }
    }
}
