// ABOUTME: Nightscout synchronization core and its HTTP transport
// ABOUTME: Connection testing, permission reconciliation, entry writes and range queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Remote service abstraction
pub mod api;
/// Status request outcome mapping
pub mod connection;
/// reqwest transport
pub mod http;
/// Permission rules and evaluator
pub mod permissions;
/// Sync service entry points
pub mod service;

pub use api::{ApiResponse, NightscoutApi};
pub use http::HttpNightscoutApi;
pub use permissions::{PermissionEvaluator, RequiredAccess, PERMISSION_RULES};
pub use service::NightscoutService;
