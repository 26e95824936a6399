//! Session issuance
//!
//! After a successful authentication the issuer writes one session row and
//! produces the matching signed cookie. The store insert must complete and
//! return the generated id before any cookie exists, so a failed insert can
//! never leave an orphan cookie behind.

use actix_web::cookie::Cookie;
use chrono::{Duration, Utc};
use log::info;
use uuid::Uuid;

use crate::models::Session;
use crate::session::cookie::SessionCookieFactory;
use crate::store::{IdentityStore, StoreError};
use crate::utils::user_agent::classify_user_agent;

/// Default session lifetime
pub const SESSION_LIFETIME_DAYS: i64 = 30;

/// Create a session for `user_id` and the cookie that references it.
///
/// The session is named after the classified user agent
/// ("{browser} on {os}") so users can recognize it in their session list.
///
/// # Errors
///
/// Returns an error if the store insert fails; no cookie is produced in
/// that case.
pub async fn issue_session(
    store: &dyn IdentityStore,
    cookie_factory: &SessionCookieFactory,
    user_agent: &str,
    user_id: Uuid,
    lifetime_days: i64,
) -> Result<(Session, Cookie<'static>), StoreError> {
    let expires_at = Utc::now() + Duration::days(lifetime_days);

    let device = classify_user_agent(user_agent);
    let name = format!("{} on {}", device.browser_name, device.os_name);

    // Insert first: the cookie is built from the generated session id
    let session = store
        .insert_session(user_id, &name, device.device_type, expires_at)
        .await?;

    info!(
        "issued session {} ({name}, {}) for user {user_id}",
        session.id, session.device_type
    );

    let cookie = cookie_factory.create_session_cookie(&session);
    Ok((session, cookie))
}
