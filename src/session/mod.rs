// Session issuance and the signed session cookie
pub mod cookie;
pub mod issuer;

pub use cookie::{SessionCookieFactory, SESSION_COOKIE_NAME};
pub use issuer::{issue_session, SESSION_LIFETIME_DAYS};
