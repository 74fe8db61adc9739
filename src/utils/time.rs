// ABOUTME: Injectable wall clock for time-dependent query bounds
// ABOUTME: System clock in production, fixed clock in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use nightscout_core::constants::query::{DAYS_PER_MONTH, MILLIS_PER_DAY};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current time, epoch milliseconds
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Length of `months` 30-day months, milliseconds
#[must_use]
pub const fn months_millis(months: i64) -> i64 {
    months * DAYS_PER_MONTH * MILLIS_PER_DAY
}
