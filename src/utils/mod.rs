// ABOUTME: Shared utilities for HTTP client construction and time handling
// ABOUTME: Keeps transport setup and clock access out of the service logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client construction with configured timeouts
pub mod http_client;
/// Injectable wall clock
pub mod time;
