//! Seeded stores and factories for tests

use std::sync::Arc;

use crate::models::{Passkey, User};
use crate::session::SessionCookieFactory;
use crate::store::{IdentityStore, MemoryStore};
use crate::utils::crypto::derive_signing_key;

/// Signing secret shared by all test fixtures
pub const TEST_SESSION_SECRET: &[u8] = b"test-session-secret";

/// A memory store plus the cookie factory wired to the test secret
pub struct TestFixtures {
    pub store: Arc<MemoryStore>,
    pub cookie_factory: SessionCookieFactory,
}

impl Default for TestFixtures {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixtures {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            cookie_factory: SessionCookieFactory::new(
                derive_signing_key(TEST_SESSION_SECRET),
                false,
            ),
        }
    }

    /// The store as the trait object handlers receive
    #[must_use]
    pub fn store_handle(&self) -> Arc<dyn IdentityStore> {
        Arc::clone(&self.store) as Arc<dyn IdentityStore>
    }

    /// Seed a user; returns the inserted record
    pub async fn seed_user(&self, email: &str, username: &str) -> User {
        let user = User::new(email, username);
        self.store
            .insert_user(user.clone())
            .await
            .expect("seed user");
        user
    }

    /// Seed a passkey credential for an existing user
    pub async fn seed_passkey(&self, user: &User, credential_id: Vec<u8>) -> Passkey {
        let passkey = Passkey::new(user.id, credential_id);
        self.store
            .insert_passkey(passkey.clone())
            .await
            .expect("seed passkey");
        passkey
    }
}
