// ABOUTME: Tests for logging configuration loaded from the environment
// ABOUTME: Format selection, production defaults and repeated initialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nightscout_sync::logging::{LogFormat, LoggingConfig, SERVICE_NAME};
use serial_test::serial;
use std::env;

fn clear_env() {
    for var in [
        "RUST_LOG",
        "LOG_FORMAT",
        "ENVIRONMENT",
        "LOG_INCLUDE_LOCATION",
        "LOG_INCLUDE_THREAD",
        "SERVICE_NAME",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.service_name, SERVICE_NAME);
    assert!(!config.include_location);
}

#[test]
#[serial]
fn test_production_json() {
    clear_env();
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("RUST_LOG", "debug");

    let config = LoggingConfig::from_env();

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "debug");
    assert!(config.include_location);
    assert!(config.include_thread);
    clear_env();
}

#[test]
#[serial]
fn test_second_init_fails_cleanly() {
    clear_env();
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };

    let first = config.init();
    let second = config.init();

    assert!(first.is_ok());
    assert!(second.is_err());
}
