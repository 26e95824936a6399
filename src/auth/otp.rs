// One-time passcode generation

use rand::Rng;

/// OTP records expire 60 seconds after issuance
pub const OTP_LIFETIME_SECONDS: i64 = 60;

/// Generate a 6-digit one-time passcode.
///
/// Uniformly random in [0, 999999], zero-padded to width 6, so the code a
/// user types is always exactly six digits.
#[must_use]
pub fn generate_otp_code() -> String {
    let code: u32 = rand::rng().random_range(0..=999_999);
    format!("{code:06}")
}
