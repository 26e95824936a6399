//! Identity store seam
//!
//! Persistence is an external collaborator: the rest of the crate only sees
//! the [`IdentityStore`] trait, which exposes lookup-by-identifier, insert,
//! and update-by-id operations over users, passkeys, OTP records, and
//! sessions. Atomicity is per operation; nothing here wraps a
//! read-then-write in a transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{DeviceType, Otp, Passkey, Session, User};

mod memory;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find a user whose email or username equals `login`
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user record
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;

    /// Replace the user's pending WebAuthn challenge.
    ///
    /// Update-by-id with per-statement atomicity only: two concurrent
    /// issuances for the same user race and the last write wins.
    async fn set_user_challenge(
        &self,
        user_id: Uuid,
        challenge: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// All passkeys registered for a user
    async fn passkeys_for_user(&self, user_id: Uuid) -> Result<Vec<Passkey>, StoreError>;

    /// Insert a registered passkey credential
    async fn insert_passkey(&self, passkey: Passkey) -> Result<(), StoreError>;

    /// Insert a one-time passcode record keyed by email
    async fn insert_otp(&self, otp: Otp) -> Result<(), StoreError>;

    /// Consume an OTP: returns the record and deletes it, enforcing
    /// single use. Expired records are never returned.
    async fn take_otp(&self, email: &str, code: &str) -> Result<Option<Otp>, StoreError>;

    /// Insert a session row and return it with the generated identifier
    async fn insert_session(
        &self,
        user_id: Uuid,
        name: &str,
        device_type: DeviceType,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, StoreError>;

    /// Look up a session by its identifier
    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, StoreError>;

    /// All sessions belonging to a user
    async fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<Session>, StoreError>;

    /// Delete a session; deleting an unknown id is not an error
    async fn delete_session(&self, session_id: Uuid) -> Result<(), StoreError>;
}
