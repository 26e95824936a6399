// Cryptographic utilities: signing key derivation and cookie value signing

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Signing key size (256 bits)
pub const SIGNING_KEY_SIZE: usize = 32;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("malformed signed value")]
    Malformed,
    #[error("signature mismatch")]
    Mismatch,
}

/// Derive a fixed-size signing key from the configured session secret.
///
/// Hashes the secret rather than truncating it, so secrets of any length
/// contribute all of their entropy.
#[must_use]
pub fn derive_signing_key(secret: &[u8]) -> [u8; SIGNING_KEY_SIZE] {
    let digest = Sha256::digest(secret);
    let mut key = [0u8; SIGNING_KEY_SIZE];
    key.copy_from_slice(&digest);
    key
}

/// Generate a cryptographically secure nonce of the specified byte length,
/// base64url-encoded. Used for WebAuthn challenges.
#[must_use]
pub fn generate_nonce(length: usize) -> String {
    let mut nonce = vec![0u8; length];
    rand::rng().fill_bytes(&mut nonce);
    URL_SAFE_NO_PAD.encode(nonce)
}

/// Sign a value for cookie transport: `{value}.{base64url(hmac)}`.
///
/// # Panics
///
/// Never panics: HMAC-SHA256 accepts keys of any length.
#[must_use]
pub fn sign_value(value: &str, key: &[u8; SIGNING_KEY_SIZE]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(value.as_bytes());
    let tag = mac.finalize().into_bytes();
    format!("{value}.{}", URL_SAFE_NO_PAD.encode(tag))
}

/// Verify a signed cookie value and return the embedded value.
///
/// # Errors
///
/// Returns an error if the value has no signature part or the signature
/// does not verify.
///
/// # Panics
///
/// Never panics: HMAC-SHA256 accepts keys of any length.
pub fn verify_value(signed: &str, key: &[u8; SIGNING_KEY_SIZE]) -> Result<String, SignatureError> {
    let (value, tag_b64) = signed.rsplit_once('.').ok_or(SignatureError::Malformed)?;
    let tag = URL_SAFE_NO_PAD
        .decode(tag_b64)
        .map_err(|_| SignatureError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(value.as_bytes());
    mac.verify_slice(&tag)
        .map_err(|_| SignatureError::Mismatch)?;

    Ok(value.to_string())
}
