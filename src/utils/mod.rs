pub mod crypto;
pub mod responses;
pub mod user_agent;
