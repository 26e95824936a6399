#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the linkfolio application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod auth;
pub mod dialog;
pub mod handlers;
pub mod models;
pub mod session;
pub mod settings;
pub mod spotify;
pub mod store;
pub mod utils;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use auth::{handle_auth_flow, AuthFlowOutcome, AuthFlowRequest};
pub use dialog::DialogStack;
pub use handlers::{list_sessions, ping, sign_in, sign_out};
pub use session::{issue_session, SessionCookieFactory, SESSION_COOKIE_NAME};
pub use settings::LinkfolioSettings;
pub use store::{IdentityStore, MemoryStore};
