//! WebAuthn authentication options
//!
//! Builds the `PublicKeyCredentialRequestOptions` payload a browser needs
//! to start a passkey ceremony. Only option issuance lives here; signature
//! verification is the authenticator library's concern, out of scope for
//! this service.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use base64urlsafedata::Base64UrlSafeData;
use webauthn_rs_proto::{
    AllowCredentials, PublicKeyCredentialRequestOptions, UserVerificationPolicy,
};

use crate::models::Passkey;
use crate::utils::crypto::generate_nonce;

/// Ceremony timeout in milliseconds; the stored challenge expires with it
pub const WEBAUTHN_TIMEOUT_MS: u32 = 60_000;

/// Challenge entropy in bytes
const CHALLENGE_LENGTH: usize = 32;

/// Build authentication options scoped to `rp_id` with an allow-list of the
/// user's registered credentials.
///
/// Returns the options plus the challenge as the base64url string that gets
/// persisted on the user record, identical to the encoding the options
/// serialize with, so the stored and returned challenges always agree.
///
/// # Panics
///
/// Never panics: the decoded challenge is the nonce this function just
/// encoded.
#[must_use]
pub fn build_authentication_options(
    rp_id: &str,
    passkeys: &[Passkey],
) -> (PublicKeyCredentialRequestOptions, String) {
    let challenge_b64 = generate_nonce(CHALLENGE_LENGTH);
    let challenge = URL_SAFE_NO_PAD
        .decode(&challenge_b64)
        .expect("nonce is valid base64url");

    let allow_credentials = passkeys
        .iter()
        .map(|p| AllowCredentials {
            type_: "public-key".to_string(),
            id: Base64UrlSafeData::from(p.credential_id.clone()),
            transports: None,
        })
        .collect();

    let options = PublicKeyCredentialRequestOptions {
        rp_id: rp_id.to_string(),
        challenge: Base64UrlSafeData::from(challenge),
        allow_credentials,
        user_verification: UserVerificationPolicy::Preferred,
        timeout: Some(WEBAUTHN_TIMEOUT_MS),
        hints: None,
        extensions: None,
    };

    (options, challenge_b64)
}
