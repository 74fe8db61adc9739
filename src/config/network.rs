// ABOUTME: Network configuration types for the Nightscout HTTP client
// ABOUTME: Request and connect timeouts with environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_var_or;
use serde::{Deserialize, Serialize};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP client timeout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Load HTTP client configuration from environment.
    ///
    /// Unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env_var_or("NIGHTSCOUT_HTTP_TIMEOUT_SECS", "")
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            connect_timeout_secs: env_var_or("NIGHTSCOUT_HTTP_CONNECT_TIMEOUT_SECS", "")
                .parse()
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}
