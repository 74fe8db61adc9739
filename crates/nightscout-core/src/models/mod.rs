// ABOUTME: Core data models for the Nightscout synchronization client
// ABOUTME: Re-exports collections, permissions, glucose readings, entries and responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `NightscoutCollection`: the closed set of remote collections
//! - `StatusResponse` / `ApiPermission`: server capabilities from the status request
//! - `GlucoseValue`: local CGM reading, mapped to an `EntryRequestBody` on upload
//! - `PostEntryResponseType` / `ResponseCode`: outcome of a write call
//! - `SetupState`: outcome of a connection test
//! - `EffectiveProfileSwitch`: versioned profile-switch record

mod collection;
mod entry;
mod glucose;
mod profile_switch;
mod response;
mod status;

pub use collection::NightscoutCollection;
pub use entry::{EntryRequestBody, RemoteDocument};
pub use glucose::{GlucoseValue, InterfaceIds, SourceSensor, TrendArrow};
pub use profile_switch::{Block, EffectiveProfileSwitch, TimeAndDuration};
pub use response::{PostEntryResponseType, ResponseCode, SetupState};
pub use status::{ApiPermission, ApiPermissions, LastModifiedResponse, StatusResponse, StorageInfo};
