//! Bearer API-key authenticator
//!
//! Attaches the configured API key as a bearer credential to outbound
//! requests. A missing key is rejected at construction time; a key the
//! API rejects surfaces as a 401/403 and is mapped to a fatal
//! authentication error by the HTTP client.

use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// Applies `Authorization: Bearer <api_key>` to HTTP requests
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    api_key: String,
}

impl ApiKeyAuthenticator {
    /// Create an authenticator from the configured API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::auth("API key is not configured"));
        }
        Ok(Self { api_key })
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.api_key)
    }
}

impl std::fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key itself
        f.debug_struct("ApiKeyAuthenticator")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
