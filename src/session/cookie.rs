use actix_web::cookie::time::OffsetDateTime;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use chrono::{DateTime, Utc};
use log::warn;
use uuid::Uuid;

use crate::models::Session;
use crate::utils::crypto::{sign_value, verify_value, SIGNING_KEY_SIZE};

/// Name of the session cookie set after authentication
pub const SESSION_COOKIE_NAME: &str = "sessionId";

/// Factory for the signed `sessionId` cookie.
///
/// The cookie value is the session id plus an HMAC tag, so a tampered id
/// never reaches the store. The secure attribute follows the deployment
/// environment: on in production, off for plain-HTTP development.
#[derive(Clone)]
pub struct SessionCookieFactory {
    signing_key: [u8; SIGNING_KEY_SIZE],
    cookie_secure: bool,
}

impl SessionCookieFactory {
    #[must_use]
    pub fn new(signing_key: [u8; SIGNING_KEY_SIZE], cookie_secure: bool) -> Self {
        Self {
            signing_key,
            cookie_secure,
        }
    }

    /// Create the session cookie for a freshly inserted session row.
    ///
    /// Attributes per the session contract: path `/`, http-only,
    /// SameSite=Lax, secure iff production, expiry matching the row.
    #[must_use]
    pub fn create_session_cookie(&self, session: &Session) -> Cookie<'static> {
        Cookie::build(
            SESSION_COOKIE_NAME,
            sign_value(&session.id.to_string(), &self.signing_key),
        )
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(self.cookie_secure)
        .expires(to_cookie_expiry(session.expires_at))
        .finish()
    }

    /// Create an already-expired cookie to clear the session client-side
    #[must_use]
    pub fn create_expired_cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .finish()
    }

    /// Extract and verify the session id from a request's cookie.
    ///
    /// Returns `None` for a missing cookie, a bad signature, or a value
    /// that is not a UUID, all equally "not signed in".
    #[must_use]
    pub fn session_id_from_request(&self, req: &HttpRequest) -> Option<Uuid> {
        let cookie = req.cookie(SESSION_COOKIE_NAME)?;
        let value = verify_value(cookie.value(), &self.signing_key)
            .map_err(|e| warn!("rejected session cookie: {e}"))
            .ok()?;
        Uuid::parse_str(&value).ok()
    }
}

fn to_cookie_expiry(expires_at: DateTime<Utc>) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
