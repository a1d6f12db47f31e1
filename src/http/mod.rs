//! HTTP client module
//!
//! Blocking-free HTTP access to the Tally API with bounded retries,
//! backoff, token-bucket rate limiting, and bearer authentication.
//! Transient failures (429, 5xx, timeouts) are retried; 401/403 are
//! fatal authentication errors; any other 4xx is fatal for the caller.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimit, RateLimitConfig};

#[cfg(test)]
mod tests;
