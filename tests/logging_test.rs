// ABOUTME: Tests for logging configuration read from the environment
// ABOUTME: Serialized because each test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use nutriguard::logging::{LogFormat, LoggingConfig, SERVICE_NAME};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "LOG_INCLUDE_SPANS",
    "SERVICE_NAME",
];

fn clear_vars() {
    for name in VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_defaults_are_quiet_and_compact() {
    clear_vars();
    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "warn");
    assert_eq!(config.format, LogFormat::Compact);
    assert!(!config.include_location);
    assert_eq!(config.service_name, SERVICE_NAME);
    assert_eq!(config.environment, "development");
}

#[test]
#[serial]
fn test_production_enables_detail() {
    clear_vars();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");

    let config = LoggingConfig::from_env();
    clear_vars();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(config.include_spans);
}

#[test]
#[serial]
fn test_individual_detail_flags() {
    clear_vars();
    env::set_var("LOG_INCLUDE_THREAD", "1");
    env::set_var("LOG_FORMAT", "PRETTY");

    let config = LoggingConfig::from_env();
    clear_vars();

    assert!(config.include_thread);
    assert!(!config.include_location);
    assert_eq!(config.format, LogFormat::Pretty);
}
