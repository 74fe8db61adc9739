// ABOUTME: Local CGM reading model and the identifiers linking it to remote systems
// ABOUTME: Read-only input to the entry synchronizer, never mutated by the client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Identifiers of a local record in external systems
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceIds {
    /// Identifier assigned by Nightscout; `None` until the record is uploaded
    #[serde(default)]
    pub nightscout_id: Option<String>,
    /// Pump-side event identifier
    #[serde(default)]
    pub pump_id: Option<i64>,
    /// Serial number of the pump that produced the record
    #[serde(default)]
    pub pump_serial: Option<String>,
}

/// Trend of a CGM reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendArrow {
    /// No trend available
    #[default]
    None,
    /// Rising very fast
    TripleUp,
    /// Rising fast
    DoubleUp,
    /// Rising
    SingleUp,
    /// Rising slowly
    FortyFiveUp,
    /// Stable
    Flat,
    /// Falling slowly
    FortyFiveDown,
    /// Falling
    SingleDown,
    /// Falling fast
    DoubleDown,
    /// Falling very fast
    TripleDown,
    /// Sensor could not compute a trend
    NotComputable,
    /// Rate outside the sensor's range
    RateOutOfRange,
}

impl TrendArrow {
    /// Name Nightscout uses in the `direction` field
    #[must_use]
    pub const fn nightscout_direction(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::TripleUp => "TripleUp",
            Self::DoubleUp => "DoubleUp",
            Self::SingleUp => "SingleUp",
            Self::FortyFiveUp => "FortyFiveUp",
            Self::Flat => "Flat",
            Self::FortyFiveDown => "FortyFiveDown",
            Self::SingleDown => "SingleDown",
            Self::DoubleDown => "DoubleDown",
            Self::TripleDown => "TripleDown",
            Self::NotComputable => "NOT COMPUTABLE",
            Self::RateOutOfRange => "RATE OUT OF RANGE",
        }
    }
}

/// Sensor or app that produced a reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceSensor {
    /// Dexcom G5 via the native app
    DexcomG5Native,
    /// Dexcom G6 via the native app
    DexcomG6Native,
    /// Freestyle Libre 1
    Libre1,
    /// Freestyle Libre 2
    Libre2,
    /// Eversense implant
    Eversense,
    /// Medtronic Enlite / Guardian
    MedtronicGuardian,
    /// Readings relayed by xDrip+
    Xdrip,
    /// Generated readings
    Random,
    /// Source not known
    #[default]
    Unknown,
}

impl SourceSensor {
    /// Device label written to uploaded entries, `None` when unknown
    #[must_use]
    pub const fn device_label(self) -> Option<&'static str> {
        match self {
            Self::DexcomG5Native => Some("Dexcom G5 Native"),
            Self::DexcomG6Native => Some("Dexcom G6 Native"),
            Self::Libre1 => Some("Libre 1"),
            Self::Libre2 => Some("Libre 2"),
            Self::Eversense => Some("Eversense"),
            Self::MedtronicGuardian => Some("Medtronic Guardian"),
            Self::Xdrip => Some("xDrip+"),
            Self::Random => Some("Random BG"),
            Self::Unknown => None,
        }
    }
}

/// A CGM reading as stored locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlucoseValue {
    /// Local primary key
    pub id: i64,
    /// Row version, bumped on every change
    pub version: i32,
    /// Local modification time, epoch milliseconds
    pub last_modified: i64,
    /// `false` once the reading has been soft-deleted
    pub valid: bool,
    /// Previous version of this reading, if any
    pub reference_id: Option<i64>,
    /// Identifiers in external systems
    pub interface_ids: InterfaceIds,
    /// Measurement time, epoch milliseconds
    pub timestamp: i64,
    /// Offset of the local timezone from UTC, milliseconds
    pub utc_offset: i64,
    /// Raw sensor value
    pub raw: Option<f64>,
    /// Calibrated glucose, mg/dL
    pub value: f64,
    /// Trend at measurement time
    pub trend_arrow: TrendArrow,
    /// Sensor noise level
    pub noise: Option<f64>,
    /// Origin of the reading
    pub source_sensor: SourceSensor,
}

impl GlucoseValue {
    /// Create a valid, not yet uploaded reading
    #[must_use]
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self {
            id: 0,
            version: 0,
            last_modified: -1,
            valid: true,
            reference_id: None,
            interface_ids: InterfaceIds::default(),
            timestamp,
            utc_offset: 0,
            raw: None,
            value,
            trend_arrow: TrendArrow::None,
            noise: None,
            source_sensor: SourceSensor::Unknown,
        }
    }

    /// Attach the identifier Nightscout assigned to this reading
    #[must_use]
    pub fn with_nightscout_id(mut self, nightscout_id: impl Into<String>) -> Self {
        self.interface_ids.nightscout_id = Some(nightscout_id.into());
        self
    }

    /// Identifier of the reading on the server, if it has been uploaded
    #[must_use]
    pub fn nightscout_id(&self) -> Option<&str> {
        self.interface_ids.nightscout_id.as_deref()
    }
}
