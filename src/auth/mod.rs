//! Authentication
//!
//! The Tally API authenticates every request with a bearer API key.

mod authenticator;

pub use authenticator::ApiKeyAuthenticator;
