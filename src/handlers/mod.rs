// HTTP surface: one module per resource
pub mod auth;
pub mod health;
pub mod sessions;

pub use auth::{sign_in, sign_out};
pub use health::ping;
pub use sessions::list_sessions;
