//! Session middleware configuration.
//!
//! Sessions only carry the cart key, so they live in memory. The cart
//! itself is persisted through the cart store.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use uuid::Uuid;
use woodora_core::cart::DEFAULT_CART_KEY;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "woodora_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session data keys.
pub mod session_keys {
    /// Cart store key for this session's cart.
    pub const CART_KEY: &str = "cart_key";
}

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Get the cart key for this session, assigning a fresh one on first use.
///
/// # Errors
///
/// Returns `tower_sessions::session::Error` if the session store fails.
pub async fn cart_key(session: &Session) -> Result<String, tower_sessions::session::Error> {
    if let Some(key) = session.get::<String>(session_keys::CART_KEY).await? {
        return Ok(key);
    }

    let key = format!("{DEFAULT_CART_KEY}-{}", Uuid::new_v4());
    session.insert(session_keys::CART_KEY, &key).await?;
    tracing::debug!(cart_key = %key, "assigned cart to session");
    Ok(key)
}
