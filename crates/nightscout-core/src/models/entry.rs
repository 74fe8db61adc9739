// ABOUTME: Wire bodies for entry uploads and documents returned by range queries
// ABOUTME: Maps local glucose readings to the Nightscout entries format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::GlucoseValue;
use crate::constants::entries::{MILLIS_PER_MINUTE, SGV_TYPE};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of an insert or update call on the `entries` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequestBody {
    /// Entry type, always `sgv` for CGM readings
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Measurement time, epoch milliseconds
    pub date: i64,
    /// Measurement time as ISO-8601 UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_string: Option<String>,
    /// Offset of the uploader's timezone from UTC, minutes
    pub utc_offset: i64,
    /// Glucose, mg/dL
    pub sgv: f64,
    /// Trend name
    pub direction: String,
    /// Sensor noise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<f64>,
    /// Filtered raw value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered: Option<f64>,
    /// Unfiltered raw value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfiltered: Option<f64>,
    /// Device that produced the reading
    pub device: String,
    /// Uploading application
    pub app: String,
    /// Server identifier, present when the reading was uploaded before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl EntryRequestBody {
    /// Map a local reading to its wire body.
    ///
    /// `device` is used when the reading's sensor has no label of its own.
    #[must_use]
    pub fn from_glucose_value(glucose: &GlucoseValue, device: &str, app: &str) -> Self {
        let date_string = DateTime::<Utc>::from_timestamp_millis(glucose.timestamp)
            .map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true));

        Self {
            entry_type: SGV_TYPE.to_owned(),
            date: glucose.timestamp,
            date_string,
            utc_offset: glucose.utc_offset / MILLIS_PER_MINUTE,
            sgv: glucose.value,
            direction: glucose.trend_arrow.nightscout_direction().to_owned(),
            noise: glucose.noise,
            filtered: glucose.raw,
            unfiltered: glucose.raw,
            device: glucose
                .source_sensor
                .device_label()
                .unwrap_or(device)
                .to_owned(),
            app: app.to_owned(),
            identifier: glucose.interface_ids.nightscout_id.clone(),
        }
    }
}

/// A document returned by a collection range query.
///
/// Only the fields the client routes on are typed; everything else is kept
/// as raw JSON for the caller to interpret per collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    /// Server identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Document time, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    /// Server modification time, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srv_modified: Option<i64>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RemoteDocument {
    /// Decode a page of documents, bare array or wrapped in an envelope
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a list of objects
    pub fn page_from_value(value: Value) -> serde_json::Result<Vec<Self>> {
        serde_json::from_value(super::status::unwrap_envelope(value))
    }
}
