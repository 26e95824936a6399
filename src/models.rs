use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod theme;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Device category derived from a user-agent string
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Other,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Mobile => write!(f, "mobile"),
            DeviceType::Desktop => write!(f, "desktop"),
            DeviceType::Other => write!(f, "other"),
        }
    }
}

/// A profile owner. The `challenge` pair is transient WebAuthn state:
/// it is set when authentication options are issued and must be treated
/// as absent once `challenge_expires_at` has passed.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub challenge: Option<String>,
    pub challenge_expires_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a user with no pending challenge
    #[must_use]
    pub fn new(email: &str, username: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            challenge: None,
            challenge_expires_at: None,
        }
    }

    /// Whether a WebAuthn ceremony is currently pending for this user
    #[must_use]
    pub fn has_pending_challenge(&self) -> bool {
        match (&self.challenge, self.challenge_expires_at) {
            (Some(_), Some(expires_at)) => expires_at > Utc::now(),
            _ => false,
        }
    }
}

/// A registered passkey credential. Immutable once registered; only the
/// credential id is needed here, to build the WebAuthn allow-list.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Passkey {
    pub id: Uuid,
    pub user_id: Uuid,
    pub credential_id: Vec<u8>,
}

impl Passkey {
    #[must_use]
    pub fn new(user_id: Uuid, credential_id: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            credential_id,
        }
    }
}

/// A one-time passcode record, keyed by email. Codes are 6 digits,
/// zero-padded, and live for 60 seconds.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Otp {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl Otp {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// A browser session. Referenced by the signed `sessionId` cookie; the
/// human-readable name ("{browser} on {os}") is shown in the session list.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub device_type: DeviceType,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
