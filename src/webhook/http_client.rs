use reqwest::{Client, ClientBuilder};
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

fn webhook_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

pub fn build_webhook_client() -> Client {
    build_webhook_client_with_timeout(DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn webhook_client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .default_headers(webhook_headers())
        .timeout(timeout)
}

/// Every request made through the returned client asks for JSON, disables
/// caching, and fails once `timeout_secs` elapses.
pub fn try_build_webhook_client(
    timeout_secs: u64,
    connect_timeout_secs: u64,
) -> Result<Client, ConfigError> {
    webhook_client_builder(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .map_err(|err| ConfigError::Load(format!("webhook http client: {err}")))
}

/// Infallible variant of [`try_build_webhook_client`]. A builder failure
/// falls back to a bare client, which sends no default headers and has no
/// timeout, and is logged.
pub fn build_webhook_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    try_build_webhook_client(timeout_secs, connect_timeout_secs).unwrap_or_else(|err| {
        warn!(error = %err, "webhook.client_fallback");
        Client::new()
    })
}

/// Sub-second variant for tests that exercise the timeout path.
#[cfg(test)]
pub(crate) fn build_webhook_client_with_duration(timeout: Duration) -> Client {
    webhook_client_builder(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}
