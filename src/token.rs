use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

use crate::types::SessionToken;

/// Generates a cryptographically random session token.
///
/// Returns a 43-character URL-safe string (32 random bytes → base64url).
/// Nothing about the user or the clock goes into it.
#[must_use]
pub fn generate_session_token() -> SessionToken {
    let random_bytes: [u8; 32] = rand::rng().random();
    SessionToken(URL_SAFE_NO_PAD.encode(random_bytes))
}
