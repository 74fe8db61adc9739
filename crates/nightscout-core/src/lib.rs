// ABOUTME: Core types and constants for the Nightscout synchronization client
// ABOUTME: Foundation crate with error handling, wire models, and API constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nightscout Core
//!
//! Foundation crate providing shared types and constants for the Nightscout
//! synchronization client. Nothing in here performs I/O; the transport and
//! the service layer live in the `nightscout_sync` crate.
//!
//! ## Modules
//!
//! - **errors**: `NightscoutError` and the classified `TransportFailure`
//! - **constants**: API paths, query defaults, and user-visible messages
//! - **models**: collections, status/permission documents, glucose readings,
//!   entry wire bodies, write responses, and profile switches

/// Error types shared by the transport and the service layer
pub mod errors;

/// API paths, defaults, and user-facing message templates
pub mod constants;

/// Nightscout domain and wire models
pub mod models;

pub use errors::{NightscoutError, NightscoutResult, TransportFailure};
