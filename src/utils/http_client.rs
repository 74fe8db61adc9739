// ABOUTME: HTTP client construction with timeout configuration
// ABOUTME: Builds the reqwest client the Nightscout transport is bound to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("nightscout-sync/", env!("CARGO_PKG_VERSION"));

/// Create an HTTP client with the configured timeouts
///
/// Falls back to a default client if the builder fails (e.g. TLS backend
/// initialization), so callers always get a usable client.
#[must_use]
pub fn create_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            Client::new()
        })
}
