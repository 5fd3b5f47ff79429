//! Session-backed [`Persistence`] for the cart and wishlist blobs.
//!
//! Session access is async while the stores are synchronous, so a request
//! works on a snapshot: [`SessionStorage::load`] copies the blobs out of the
//! session, the store mutates the snapshot, and [`SessionStorage::commit`]
//! writes changed keys back.

use std::collections::{BTreeSet, HashMap};

use tower_sessions::Session;

use lavs_boutique_core::Persistence;
use lavs_boutique_core::store::keys;

/// Per-request snapshot of a visitor's persisted blobs.
#[derive(Debug, Default)]
pub struct SessionStorage {
    entries: HashMap<String, String>,
    dirty: BTreeSet<String>,
}

impl SessionStorage {
    /// Copy the cart and wishlist blobs out of the session.
    ///
    /// Values that cannot be read are treated as absent.
    pub async fn load(session: &Session) -> Self {
        let mut entries = HashMap::new();
        for key in [keys::CART, keys::WISHLIST] {
            match session.get::<String>(key).await {
                Ok(Some(value)) => {
                    entries.insert(key.to_owned(), value);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(key, error = %e, "Failed to read session value"),
            }
        }

        Self {
            entries,
            dirty: BTreeSet::new(),
        }
    }

    /// Write every key saved since [`Self::load`] back to the session.
    ///
    /// # Errors
    ///
    /// Returns the session error if the store rejects the write.
    pub async fn commit(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        for key in &self.dirty {
            if let Some(value) = self.entries.get(key) {
                session.insert(key, value).await?;
            }
        }
        Ok(())
    }
}

impl Persistence for SessionStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
        self.dirty.insert(key.to_owned());
    }
}
