//! Sign-in and sign-out endpoints
//!
//! `sign_in` accepts the login form and maps each flow outcome onto the
//! wire: 400 with an inline message, 307 to registration, or 200 with an
//! `authType` discriminator. `sign_out` revokes the session row and clears
//! the cookie in one response.

use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{handle_auth_flow, AuthFlowOutcome, AuthFlowRequest};
use crate::session::SessionCookieFactory;
use crate::store::IdentityStore;
use crate::utils::responses::ResponseBuilder;

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub login: String,
    /// Submitted by the client script as the string "true" or "false"
    #[serde(rename = "browserSupportsPasskeys", default)]
    pub browser_supports_passkeys: String,
}

/// POST /auth/sign_in
pub async fn sign_in(
    req: HttpRequest,
    form: web::Form<SignInForm>,
    store: web::Data<dyn IdentityStore>,
) -> HttpResponse {
    let request = AuthFlowRequest {
        login: form.login.trim().to_string(),
        browser_supports_passkeys: form.browser_supports_passkeys == "true",
        hostname: request_hostname(&req),
    };

    let outcome = match handle_auth_flow(store.as_ref(), &request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("sign-in flow failed: {e}");
            return ResponseBuilder::server_error();
        }
    };

    match outcome {
        AuthFlowOutcome::Rejected { message } => ResponseBuilder::validation_failed(&message),
        AuthFlowOutcome::RedirectToRegistration { location } => {
            ResponseBuilder::temporary_redirect(&location)
        }
        AuthFlowOutcome::WebauthnChallenge(options) => {
            // The discriminator rides alongside the ceremony options
            let Ok(serde_json::Value::Object(mut payload)) = serde_json::to_value(&options) else {
                error!("webauthn options did not serialize to an object");
                return ResponseBuilder::server_error();
            };
            payload.insert("authType".to_string(), json!("webauthn"));
            ResponseBuilder::ok_json(&payload)
        }
        AuthFlowOutcome::EmailOtp => ResponseBuilder::ok_json(&json!({ "authType": "email-otp" })),
    }
}

/// POST /auth/sign_out
///
/// Deletes the session row when the cookie verifies, and always answers
/// with an already-expired cookie so the client state is cleared either
/// way.
pub async fn sign_out(
    req: HttpRequest,
    store: web::Data<dyn IdentityStore>,
    cookie_factory: web::Data<SessionCookieFactory>,
) -> HttpResponse {
    if let Some(session_id) = cookie_factory.session_id_from_request(&req) {
        if let Err(e) = store.delete_session(session_id).await {
            error!("failed to delete session {session_id}: {e}");
            return ResponseBuilder::server_error();
        }
        info!("signed out session {session_id}");
    }

    ResponseBuilder::ok_json_with_cookie(
        &json!({ "success": true }),
        cookie_factory.create_expired_cookie(),
    )
}

/// Request hostname without any port suffix; becomes the WebAuthn
/// relying-party id
fn request_hostname(req: &HttpRequest) -> String {
    let info = req.connection_info();
    info.host()
        .split(':')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_hostname_strips_port() {
        let req = TestRequest::get()
            .insert_header(("Host", "links.example:8080"))
            .to_http_request();
        assert_eq!(request_hostname(&req), "links.example");
    }

    #[test]
    fn test_sign_in_form_field_names() {
        let form: SignInForm =
            serde_urlencoded::from_str("login=amy&browserSupportsPasskeys=true").unwrap();
        assert_eq!(form.login, "amy");
        assert_eq!(form.browser_supports_passkeys, "true");

        // The passkey flag is optional; absence means no support
        let bare: SignInForm = serde_urlencoded::from_str("login=amy").unwrap();
        assert_eq!(bare.browser_supports_passkeys, "");
    }
}
