// ABOUTME: Server status document and per-collection API permission flags
// ABOUTME: Parses Nightscout "crud" permission strings into capability checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::NightscoutCollection;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

bitflags::bitflags! {
    /// Access granted on one collection, parsed from a string such as `"crud"`.
    ///
    /// Each letter grants one operation: `c`reate, `r`ead, `u`pdate, `d`elete.
    /// Letters outside that set are ignored.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ApiPermission: u8 {
        /// Create documents
        const CREATE = 0b0001;
        /// Read documents
        const READ = 0b0010;
        /// Update documents
        const UPDATE = 0b0100;
        /// Delete documents
        const DELETE = 0b1000;
    }
}

impl ApiPermission {
    /// Parse a permission string as sent by the server
    #[must_use]
    pub fn parse(permissions: &str) -> Self {
        permissions
            .chars()
            .fold(Self::empty(), |acc, letter| match letter {
                'c' | 'C' => acc | Self::CREATE,
                'r' | 'R' => acc | Self::READ,
                'u' | 'U' => acc | Self::UPDATE,
                'd' | 'D' => acc | Self::DELETE,
                _ => acc,
            })
    }

    /// Documents may be read
    #[must_use]
    pub const fn read(self) -> bool {
        self.contains(Self::READ)
    }

    /// Documents may be created and updated
    #[must_use]
    pub const fn create_update(self) -> bool {
        self.contains(Self::CREATE.union(Self::UPDATE))
    }

    /// Documents may be read and created
    #[must_use]
    pub const fn read_create(self) -> bool {
        self.contains(Self::READ.union(Self::CREATE))
    }

    /// Every operation is granted
    #[must_use]
    pub const fn full(self) -> bool {
        self.contains(Self::all())
    }

    /// Canonical `crud` form, letters in fixed order
    #[must_use]
    pub fn to_permission_string(self) -> String {
        [
            (Self::CREATE, 'c'),
            (Self::READ, 'r'),
            (Self::UPDATE, 'u'),
            (Self::DELETE, 'd'),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, letter)| letter)
        .collect()
    }
}

impl Serialize for ApiPermission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_permission_string())
    }
}

impl<'de> Deserialize<'de> for ApiPermission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PermissionVisitor;

        impl Visitor<'_> for PermissionVisitor {
            type Value = ApiPermission;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a permission string such as \"crud\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ApiPermission, E> {
                Ok(ApiPermission::parse(value))
            }

            fn visit_unit<E: de::Error>(self) -> Result<ApiPermission, E> {
                Ok(ApiPermission::empty())
            }
        }

        deserializer.deserialize_any(PermissionVisitor)
    }
}

/// Permissions the server grants the configured token, per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPermissions {
    /// `devicestatus` collection
    #[serde(default, rename = "devicestatus")]
    pub device_status: ApiPermission,
    /// `entries` collection
    #[serde(default)]
    pub entries: ApiPermission,
    /// `food` collection
    #[serde(default)]
    pub food: ApiPermission,
    /// `profile` collection
    #[serde(default)]
    pub profile: ApiPermission,
    /// `settings` collection
    #[serde(default)]
    pub settings: ApiPermission,
    /// `treatments` collection
    #[serde(default)]
    pub treatments: ApiPermission,
}

impl ApiPermissions {
    /// Permission granted on `collection`
    #[must_use]
    pub const fn for_collection(&self, collection: NightscoutCollection) -> ApiPermission {
        match collection {
            NightscoutCollection::DeviceStatus => self.device_status,
            NightscoutCollection::Entries => self.entries,
            NightscoutCollection::Food => self.food,
            NightscoutCollection::Profile => self.profile,
            NightscoutCollection::Settings => self.settings,
            NightscoutCollection::Treatments => self.treatments,
        }
    }
}

/// Backend storage reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Storage engine name (e.g. "mongodb")
    pub storage: String,
    /// Storage engine version
    #[serde(default)]
    pub version: Option<String>,
}

/// Snapshot of server capabilities returned by the status request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Nightscout server version
    #[serde(default)]
    pub version: Option<String>,
    /// API version
    #[serde(default)]
    pub api_version: Option<String>,
    /// Server clock, epoch milliseconds
    #[serde(default)]
    pub srv_date: Option<i64>,
    /// Backend storage description
    #[serde(default)]
    pub storage: Option<StorageInfo>,
    /// Permissions granted to the caller
    #[serde(default)]
    pub api_permissions: ApiPermissions,
}

impl StatusResponse {
    /// Decode a status document, bare or wrapped in a `{status, result}` envelope
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a status document
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(unwrap_envelope(value))
    }
}

/// Last server-side modification time of each collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastModifiedResponse {
    /// Server clock, epoch milliseconds
    #[serde(default)]
    pub srv_date: Option<i64>,
    /// Epoch milliseconds keyed by collection wire name
    #[serde(default)]
    pub collections: BTreeMap<String, i64>,
}

impl LastModifiedResponse {
    /// Last modification of `collection`, if the server reported one
    #[must_use]
    pub fn for_collection(&self, collection: NightscoutCollection) -> Option<i64> {
        self.collections.get(collection.as_str()).copied()
    }

    /// Decode a last-modified document, bare or wrapped in an envelope
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a last-modified document
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(unwrap_envelope(value))
    }
}

/// API v3 servers may wrap payloads as `{"status": 200, "result": ...}`
pub(crate) fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("status") && map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}
