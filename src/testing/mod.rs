//! Test fixtures and request helpers.
//!
//! Compiled only for tests and the `testing` feature; integration tests
//! enable the feature to share these helpers.

pub mod fixtures;
pub mod requests;

pub use fixtures::TestFixtures;
pub use requests::RequestBuilder;
