// Authentication flow: login identifier triage, OTP issuance, and WebAuthn
// challenge generation
pub mod flow;
pub mod otp;
pub mod webauthn;

pub use flow::{handle_auth_flow, AuthFlowOutcome, AuthFlowRequest};
