// ABOUTME: Main library entry point for the Nightscout synchronization client
// ABOUTME: Connection testing, permission reconciliation, glucose uploads and range queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nightscout Sync
//!
//! Client core that keeps a local diabetes-management store in step with a
//! remote Nightscout server over its v3 REST API.
//!
//! ## Architecture
//!
//! - **Config**: server URL, token, HTTP timeouts and per-concern sync modes
//! - **Nightscout**: the `NightscoutApi` transport seam, its reqwest
//!   implementation, the permission evaluator and `NightscoutService`
//! - **Logging**: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nightscout_sync::config::{NightscoutConfig, SyncSettings};
//! use nightscout_sync::nightscout::NightscoutService;
//! use nightscout_sync::NightscoutResult;
//!
//! #[tokio::main]
//! async fn main() -> NightscoutResult<()> {
//!     let config = NightscoutConfig::from_env()?;
//!     let service = NightscoutService::from_config(&config, SyncSettings::from_env())?;
//!
//!     println!("{:?}", service.test_connection().await);
//!     Ok(())
//! }
//! ```

/// Configuration loaded from the environment
pub mod config;

/// Structured logging setup
pub mod logging;

/// Sync service, permission evaluation and HTTP transport
pub mod nightscout;

/// HTTP client and clock helpers
pub mod utils;

pub use nightscout_core::{constants, errors, models};
pub use nightscout_core::{NightscoutError, NightscoutResult, TransportFailure};
