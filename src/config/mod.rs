// ABOUTME: Configuration management for the Nightscout client
// ABOUTME: Server connection, HTTP timeouts, and per-concern sync modes from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: server URL, token, and upload identity
//! - **Network**: HTTP client timeouts
//! - **Sync**: sync-mode preferences consumed by the permission evaluator

/// Server connection configuration
pub mod environment;
/// HTTP client timeout configuration
pub mod network;
/// Sync-mode preferences
pub mod sync;

pub use environment::NightscoutConfig;
pub use network::HttpClientConfig;
pub use sync::{SyncConcern, SyncMode, SyncSettings};

use std::env;

/// Read an environment variable, falling back to `default`
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a boolean flag as written in environment files or preference stores
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
