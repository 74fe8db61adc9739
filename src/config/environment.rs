// ABOUTME: Nightscout server connection configuration loaded from environment variables
// ABOUTME: Validates the base URL and carries credentials and upload identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{env_var_or, HttpClientConfig};
use nightscout_core::errors::{NightscoutError, NightscoutResult};
use std::env;
use std::fmt;
use url::Url;

/// Default device label for uploaded readings
pub const DEFAULT_DEVICE_NAME: &str = "nightscout-sync";

/// Default application label for uploaded readings
pub const DEFAULT_APP_NAME: &str = "nightscout-sync";

/// Connection settings for one Nightscout server
#[derive(Clone)]
pub struct NightscoutConfig {
    /// Server root, always ending in `/`
    pub base_url: Url,
    /// Access token or JWT sent as a bearer credential
    pub token: Option<String>,
    /// Device label written to uploaded entries
    pub device_name: String,
    /// Application label written to uploaded entries
    pub app_name: String,
    /// HTTP timeouts
    pub http: HttpClientConfig,
}

impl fmt::Debug for NightscoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NightscoutConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("device_name", &self.device_name)
            .field("app_name", &self.app_name)
            .field("http", &self.http)
            .finish()
    }
}

impl NightscoutConfig {
    /// Configuration for `base_url` with defaults for everything else
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is malformed or not http(s)
    pub fn new(base_url: &str) -> NightscoutResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            device_name: DEFAULT_DEVICE_NAME.to_owned(),
            app_name: DEFAULT_APP_NAME.to_owned(),
            http: HttpClientConfig::default(),
        })
    }

    /// Set the access token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `NIGHTSCOUT_URL` is missing or malformed
    pub fn from_env() -> NightscoutResult<Self> {
        Self::from_env_with_url(None)
    }

    /// Load configuration from environment variables, taking the server URL
    /// from `url` when given
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no URL is available or it is malformed
    pub fn from_env_with_url(url: Option<&str>) -> NightscoutResult<Self> {
        let raw_url = match url {
            Some(url) => url.to_owned(),
            None => env::var("NIGHTSCOUT_URL")
                .map_err(|_| NightscoutError::config("NIGHTSCOUT_URL", "variable is not set"))?,
        };

        let token = env::var("NIGHTSCOUT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            base_url: parse_base_url(&raw_url)?,
            token,
            device_name: env_var_or("NIGHTSCOUT_DEVICE_NAME", DEFAULT_DEVICE_NAME),
            app_name: env_var_or("NIGHTSCOUT_APP_NAME", DEFAULT_APP_NAME),
            http: HttpClientConfig::from_env(),
        })
    }
}

/// Parse and normalize the server root so relative joins keep any path prefix
fn parse_base_url(raw: &str) -> NightscoutResult<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&normalized)
        .map_err(|e| NightscoutError::config("NIGHTSCOUT_URL", format!("invalid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(NightscoutError::config(
            "NIGHTSCOUT_URL",
            "URL has no host",
        )),
        other => Err(NightscoutError::config(
            "NIGHTSCOUT_URL",
            format!("unsupported scheme '{other}'"),
        )),
    }
}
