//! In-memory [`IdentityStore`] implementation
//!
//! Backs single-process deployments and the test suite. Each trait method
//! takes the lock once, so every operation is atomic on its own, the same
//! per-statement guarantee a relational backend would give.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{DeviceType, Otp, Passkey, Session, User};
use crate::store::{IdentityStore, StoreError};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    passkeys: Vec<Passkey>,
    otps: Vec<Otp>,
    sessions: HashMap<Uuid, Session>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    fail_next_session_insert: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for the next `insert_session` call to fail, for exercising
    /// the no-cookie-without-a-session-row ordering guarantee.
    #[cfg(any(test, feature = "testing"))]
    pub fn fail_next_session_insert(&self) {
        self.fail_next_session_insert.store(true, Ordering::SeqCst);
    }

    /// Read the most recent OTP for an email without consuming it. Tests
    /// need this because the flow never returns the code to the caller.
    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn peek_otp(&self, email: &str) -> Option<Otp> {
        self.inner
            .read()
            .ok()?
            .otps
            .iter()
            .rev()
            .find(|o| o.email == email)
            .cloned()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend("store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend("store lock poisoned"))
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .users
            .values()
            .find(|u| u.email == login || u.username == login)
            .cloned())
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner
            .users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(StoreError::Conflict(format!(
                "user {} already exists",
                user.username
            )));
        }
        inner.users.insert(user.id, user);
        Ok(())
    }

    async fn set_user_challenge(
        &self,
        user_id: Uuid,
        challenge: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if let Some(user) = inner.users.get_mut(&user_id) {
            user.challenge = Some(challenge.to_string());
            user.challenge_expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn passkeys_for_user(&self, user_id: Uuid) -> Result<Vec<Passkey>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .passkeys
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_passkey(&self, passkey: Passkey) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.passkeys.push(passkey);
        Ok(())
    }

    async fn insert_otp(&self, otp: Otp) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.otps.push(otp);
        Ok(())
    }

    async fn take_otp(&self, email: &str, code: &str) -> Result<Option<Otp>, StoreError> {
        let mut inner = self.write()?;
        let position = inner
            .otps
            .iter()
            .position(|o| o.email == email && o.code == code);
        match position {
            Some(index) => {
                let otp = inner.otps.remove(index);
                if otp.is_expired() {
                    Ok(None)
                } else {
                    Ok(Some(otp))
                }
            }
            None => Ok(None),
        }
    }

    async fn insert_session(
        &self,
        user_id: Uuid,
        name: &str,
        device_type: DeviceType,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, StoreError> {
        if self.fail_next_session_insert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::backend("injected session insert failure"));
        }

        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            device_type,
            expires_at,
        };
        let mut inner = self.write()?;
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, StoreError> {
        let inner = self.read()?;
        Ok(inner.sessions.get(&session_id).cloned())
    }

    async fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<Session>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_session(&self, session_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.sessions.remove(&session_id);
        Ok(())
    }
}
