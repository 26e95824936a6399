//! Auth flow orchestration
//!
//! One login attempt resolves to exactly one of four terminal outcomes:
//! rejected input, redirect to registration, a WebAuthn challenge, or an
//! emailed one-time passcode. The passkey branch requires both a registered
//! passkey AND client support: a conjunction, not a preference order, so a
//! browser is never handed a challenge it cannot complete.

use chrono::{Duration, Utc};
use log::debug;
use webauthn_rs_proto::PublicKeyCredentialRequestOptions;

use crate::auth::otp::{generate_otp_code, OTP_LIFETIME_SECONDS};
use crate::auth::webauthn::{build_authentication_options, WEBAUTHN_TIMEOUT_MS};
use crate::store::{IdentityStore, StoreError};
use crate::validation::{classify_login, LoginKind};

/// One parsed sign-in attempt
#[derive(Debug, Clone)]
pub struct AuthFlowRequest {
    /// Email address or username, as submitted
    pub login: String,
    /// Whether the client claims WebAuthn passkey support
    pub browser_supports_passkeys: bool,
    /// Request hostname; becomes the WebAuthn relying-party id
    pub hostname: String,
}

/// Terminal outcome of a login attempt
#[derive(Debug)]
pub enum AuthFlowOutcome {
    /// Malformed login identifier; nothing was persisted
    Rejected { message: String },
    /// No such user; send them to onboarding with the identifier prefilled
    RedirectToRegistration { location: String },
    /// Passkey ceremony started; challenge persisted on the user record
    WebauthnChallenge(PublicKeyCredentialRequestOptions),
    /// OTP recorded against the user's email, delivery pending
    EmailOtp,
}

/// Run the authentication flow for one submitted login.
///
/// Store and option-generation failures propagate; the caller surfaces
/// them as a generic server error.
///
/// # Errors
///
/// Returns an error when the identity store fails.
pub async fn handle_auth_flow(
    store: &dyn IdentityStore,
    request: &AuthFlowRequest,
) -> Result<AuthFlowOutcome, StoreError> {
    // Syntactic check first: rejected input never touches the store
    let Some(login_kind) = classify_login(&request.login) else {
        return Ok(AuthFlowOutcome::Rejected {
            message: "Invalid email address or username.".to_string(),
        });
    };

    let Some(user) = store.find_user_by_login(&request.login).await? else {
        // Unknown identity is onboarding, not an error. 307 keeps the
        // form's POST method across the redirect.
        let param = match login_kind {
            LoginKind::Email => "email",
            LoginKind::Username => "username",
        };
        let location = format!(
            "/register?{param}={}",
            urlencoding::encode(&request.login)
        );
        return Ok(AuthFlowOutcome::RedirectToRegistration { location });
    };

    let passkeys = store.passkeys_for_user(user.id).await?;

    if request.browser_supports_passkeys && !passkeys.is_empty() {
        let (options, challenge) = build_authentication_options(&request.hostname, &passkeys);
        let challenge_expires_at =
            Utc::now() + Duration::milliseconds(i64::from(WEBAUTHN_TIMEOUT_MS));

        store
            .set_user_challenge(user.id, &challenge, challenge_expires_at)
            .await?;

        debug!(
            "issued webauthn challenge for user {} with {} allowed credential(s)",
            user.id,
            options.allow_credentials.len()
        );
        return Ok(AuthFlowOutcome::WebauthnChallenge(options));
    }

    // No passkey, no client support, or both: fall back to an emailed code
    let code = generate_otp_code();
    let expires_at = Utc::now() + Duration::seconds(OTP_LIFETIME_SECONDS);
    store
        .insert_otp(crate::models::Otp {
            email: user.email.clone(),
            code,
            expires_at,
        })
        .await?;

    // TODO: hand the code to the mailer once the email collaborator exists
    debug!("recorded otp for {}", user.email);

    Ok(AuthFlowOutcome::EmailOtp)
}
