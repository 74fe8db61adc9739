// ABOUTME: Versioned, soft-deletable record of an effective profile switch
// ABOUTME: Carries a time window, basal blocks, and a supersession lineage pointer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::InterfaceIds;
use crate::errors::{NightscoutError, NightscoutResult};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Records that cover a time window starting at `timestamp`
pub trait TimeAndDuration {
    /// Start of the window, epoch milliseconds
    fn timestamp(&self) -> i64;

    /// Length of the window, milliseconds
    fn duration(&self) -> i64;

    /// End of the window (exclusive), epoch milliseconds
    fn end(&self) -> i64 {
        self.timestamp().saturating_add(self.duration())
    }

    /// Whether `at` falls inside the window
    fn is_active_at(&self, at: i64) -> bool {
        at >= self.timestamp() && at < self.end()
    }
}

/// One constant-rate segment of a basal profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Length of the segment, milliseconds
    pub duration: i64,
    /// Rate during the segment, units per hour
    pub amount: f64,
}

/// A profile switch as it was actually applied.
///
/// Records are never deleted: a change produces a history copy that points
/// back at the current row through `reference_id`, and removal only clears
/// `valid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveProfileSwitch {
    /// Local primary key, `0` until persisted
    pub id: i64,
    /// Row version, bumped on every change
    pub version: i32,
    /// Local modification time, epoch milliseconds
    pub last_modified: i64,
    /// `false` once the record has been invalidated
    pub valid: bool,
    /// Record this one is a historic copy of
    pub reference_id: Option<i64>,
    /// Identifiers in external systems
    pub interface_ids: Option<InterfaceIds>,
    /// Switch time, epoch milliseconds
    pub timestamp: i64,
    /// Offset of the local timezone from UTC, milliseconds
    pub utc_offset: i64,
    /// How long the switch stays in effect, milliseconds
    pub duration: i64,
    /// Basal rates, in order, starting at midnight
    pub basal_blocks: Vec<Block>,
}

impl EffectiveProfileSwitch {
    /// Create a new, unsaved, valid switch
    #[must_use]
    pub fn new(timestamp: i64, utc_offset: i64, duration: i64, basal_blocks: Vec<Block>) -> Self {
        Self {
            id: 0,
            version: 0,
            last_modified: -1,
            valid: true,
            reference_id: None,
            interface_ids: None,
            timestamp,
            utc_offset,
            duration,
            basal_blocks,
        }
    }

    /// Insulin delivered by one pass over the basal blocks, units
    #[must_use]
    pub fn total_basal(&self) -> f64 {
        self.basal_blocks
            .iter()
            .map(|block| block.amount * block.duration as f64 / MILLIS_PER_HOUR)
            .sum()
    }

    /// Copy of this record to be stored as history of the current row
    #[must_use]
    pub fn history_copy(&self) -> Self {
        Self {
            id: 0,
            reference_id: Some(self.id),
            ..self.clone()
        }
    }

    /// Soft-delete the record
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.version += 1;
    }

    /// Check that `reference_id` points at `referenced`, an earlier record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineage` if the record references itself, if the
    /// referenced record is missing or has a different id, or if it was
    /// created after this one.
    pub fn validate_reference(&self, referenced: Option<&Self>) -> NightscoutResult<()> {
        let Some(reference_id) = self.reference_id else {
            return Ok(());
        };

        let invalid = |reason: String| NightscoutError::InvalidLineage {
            record: self.id,
            reason,
        };

        if self.id != 0 && reference_id == self.id {
            return Err(invalid("record references itself".to_owned()));
        }
        match referenced {
            None => Err(invalid(format!("referenced record {reference_id} not found"))),
            Some(prior) if prior.id != reference_id => Err(invalid(format!(
                "expected record {reference_id}, got {}",
                prior.id
            ))),
            Some(prior) if self.id != 0 && prior.id > self.id => Err(invalid(format!(
                "referenced record {reference_id} is newer than this record"
            ))),
            Some(_) => Ok(()),
        }
    }
}

impl TimeAndDuration for EffectiveProfileSwitch {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn duration(&self) -> i64 {
        self.duration
    }
}
