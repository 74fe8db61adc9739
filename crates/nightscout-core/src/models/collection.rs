// ABOUTME: Enumeration of the remote Nightscout collections
// ABOUTME: Used as a routing key in API paths and as a display label in messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remote resource collections exposed by the Nightscout API.
///
/// The declaration order is significant: permission checks walk the
/// collections in this order, so violation messages come out in it too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NightscoutCollection {
    /// Pump, loop and uploader device status documents
    #[serde(rename = "devicestatus")]
    DeviceStatus,
    /// Food database
    Food,
    /// Therapy profiles
    Profile,
    /// Insulin, carbs and careportal events
    Treatments,
    /// CGM readings
    Entries,
    /// Client settings
    Settings,
}

impl NightscoutCollection {
    /// Every collection, in evaluation order
    pub const ALL: [Self; 6] = [
        Self::DeviceStatus,
        Self::Food,
        Self::Profile,
        Self::Treatments,
        Self::Entries,
        Self::Settings,
    ];

    /// Wire name of the collection, also used as its display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeviceStatus => "devicestatus",
            Self::Food => "food",
            Self::Profile => "profile",
            Self::Treatments => "treatments",
            Self::Entries => "entries",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for NightscoutCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NightscoutCollection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown Nightscout collection: {s}"))
    }
}
