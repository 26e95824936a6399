//! Session listing for the account settings page

use actix_web::{web, HttpRequest, HttpResponse};
use log::error;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{DeviceType, Session};
use crate::session::SessionCookieFactory;
use crate::store::IdentityStore;
use crate::utils::responses::ResponseBuilder;

/// One row of the "your sessions" list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: Uuid,
    pub name: String,
    pub device_type: DeviceType,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    /// Whether this row backs the cookie the request arrived with
    pub current: bool,
}

impl SessionSummary {
    fn from_session(session: &Session, current_id: Uuid) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            device_type: session.device_type,
            expires_at: session.expires_at,
            current: session.id == current_id,
        }
    }
}

/// GET /account/sessions
///
/// Requires a valid session cookie; an expired or unknown session is the
/// same as no cookie at all.
pub async fn list_sessions(
    req: HttpRequest,
    store: web::Data<dyn IdentityStore>,
    cookie_factory: web::Data<SessionCookieFactory>,
) -> HttpResponse {
    let Some(session_id) = cookie_factory.session_id_from_request(&req) else {
        return ResponseBuilder::unauthorized();
    };

    let current = match store.find_session(session_id).await {
        Ok(Some(session)) if !session.is_expired() => session,
        Ok(_) => return ResponseBuilder::unauthorized(),
        Err(e) => {
            error!("session lookup failed: {e}");
            return ResponseBuilder::server_error();
        }
    };

    let sessions = match store.sessions_for_user(current.user_id).await {
        Ok(sessions) => sessions,
        Err(e) => {
            error!("session listing failed: {e}");
            return ResponseBuilder::server_error();
        }
    };

    let summaries: Vec<SessionSummary> = sessions
        .iter()
        .filter(|s| !s.is_expired())
        .map(|s| SessionSummary::from_session(s, current.id))
        .collect();

    ResponseBuilder::ok_json(&summaries)
}
