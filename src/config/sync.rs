// ABOUTME: Sync-mode preferences deciding which server permissions each concern needs
// ABOUTME: Read-only settings object built from the environment or a key-value store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{env_var_or, parse_flag};
use nightscout_core::constants::preference_keys;
use nightscout_core::models::ApiPermission;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Direction of synchronization for one concern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncMode {
    /// Download only; needs read access
    #[default]
    Pull,
    /// Upload only; needs create and update access
    Push,
    /// Both directions; needs every permission
    Sync,
}

impl SyncMode {
    /// Parse a stored mode string; anything unrecognized is `Pull`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PUSH" => Self::Push,
            "SYNC" => Self::Sync,
            _ => Self::Pull,
        }
    }

    /// Whether `permission` grants what this mode needs
    #[must_use]
    pub const fn is_satisfied_by(self, permission: ApiPermission) -> bool {
        match self {
            Self::Pull => permission.read(),
            Self::Push => permission.create_update(),
            Self::Sync => permission.full(),
        }
    }

    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pull => "PULL",
            Self::Push => "PUSH",
            Self::Sync => "SYNC",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of data the user configures a sync mode for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyncConcern {
    /// CGM readings
    Cgm,
    /// Food database
    Food,
    /// Profiles
    Profile,
    /// Insulin treatments
    Insulin,
    /// Carbohydrate treatments
    Carbs,
    /// Careportal treatments
    Careportal,
    /// Settings documents
    Settings,
}

impl SyncConcern {
    /// Every concern
    pub const ALL: [Self; 7] = [
        Self::Cgm,
        Self::Food,
        Self::Profile,
        Self::Insulin,
        Self::Carbs,
        Self::Careportal,
        Self::Settings,
    ];

    /// Key of this concern in the preference store
    #[must_use]
    pub const fn preference_key(self) -> &'static str {
        match self {
            Self::Cgm => preference_keys::CGM,
            Self::Food => preference_keys::FOOD,
            Self::Profile => preference_keys::PROFILE,
            Self::Insulin => preference_keys::INSULIN,
            Self::Carbs => preference_keys::CARBS,
            Self::Careportal => preference_keys::CAREPORTAL,
            Self::Settings => preference_keys::SETTINGS,
        }
    }

    /// Environment variable overriding this concern's mode
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Cgm => "NIGHTSCOUT_SYNC_CGM",
            Self::Food => "NIGHTSCOUT_SYNC_FOOD",
            Self::Profile => "NIGHTSCOUT_SYNC_PROFILE",
            Self::Insulin => "NIGHTSCOUT_SYNC_INSULIN",
            Self::Carbs => "NIGHTSCOUT_SYNC_CARBS",
            Self::Careportal => "NIGHTSCOUT_SYNC_CAREPORTAL",
            Self::Settings => "NIGHTSCOUT_SYNC_SETTINGS",
        }
    }
}

/// User sync preferences, passed explicitly to the permission evaluator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Reduced mode: follow another uploader, never upload device status
    pub client_only: bool,
    modes: BTreeMap<SyncConcern, SyncMode>,
}

impl SyncSettings {
    /// Settings with every concern in `Pull` mode
    #[must_use]
    pub fn new(client_only: bool) -> Self {
        Self {
            client_only,
            modes: BTreeMap::new(),
        }
    }

    /// Set the mode of one concern
    #[must_use]
    pub fn with_mode(mut self, concern: SyncConcern, mode: SyncMode) -> Self {
        self.modes.insert(concern, mode);
        self
    }

    /// Configured mode of `concern`, `Pull` when unset
    #[must_use]
    pub fn mode(&self, concern: SyncConcern) -> SyncMode {
        self.modes.get(&concern).copied().unwrap_or_default()
    }

    /// Build from a key-value preference store.
    ///
    /// Recognizes the `ns_*` keys; unknown keys are ignored.
    pub fn from_preferences<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        entries
            .into_iter()
            .fold(Self::default(), |mut settings, (key, value)| {
                let (key, value) = (key.as_ref(), value.as_ref());
                if key == preference_keys::CLIENT_ONLY {
                    settings.client_only = parse_flag(value).unwrap_or(false);
                } else if let Some(concern) = SyncConcern::ALL
                    .into_iter()
                    .find(|concern| concern.preference_key() == key)
                {
                    settings.modes.insert(concern, SyncMode::parse(value));
                }
                settings
            })
    }

    /// Load from `NIGHTSCOUT_CLIENT_ONLY` and `NIGHTSCOUT_SYNC_<CONCERN>`
    #[must_use]
    pub fn from_env() -> Self {
        let client_only = parse_flag(&env_var_or("NIGHTSCOUT_CLIENT_ONLY", "false")).unwrap_or(false);

        SyncConcern::ALL
            .into_iter()
            .filter_map(|concern| {
                std::env::var(concern.env_var())
                    .ok()
                    .map(|value| (concern, SyncMode::parse(&value)))
            })
            .fold(Self::new(client_only), |settings, (concern, mode)| {
                settings.with_mode(concern, mode)
            })
    }
}
