//! Session middleware configuration.
//!
//! The session plays the role of the shopper's local storage: it holds the
//! `"cart"` and `"wishlist"` blobs and nothing else. Sessions are kept in
//! memory, so they do not survive a restart.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "lavs_session";

/// Session expiry time in days of inactivity.
const SESSION_EXPIRY_DAYS: i64 = 30;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::days(SESSION_EXPIRY_DAYS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
