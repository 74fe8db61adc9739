// ABOUTME: Nightscout sync service: connection test, glucose entry writes and range queries
// ABOUTME: Each call issues one request through the injected NightscoutApi and maps the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::api::{ApiResponse, NightscoutApi};
use super::connection;
use super::http::HttpNightscoutApi;
use crate::config::{NightscoutConfig, SyncSettings};
use crate::utils::time::{months_millis, Clock, SystemClock};
use nightscout_core::constants::query::{
    DEFAULT_DATE_SORT, DEFAULT_LIMIT, DEFAULT_LOOKBACK_MONTHS, DEFAULT_MODIFIED_SORT,
};
use nightscout_core::errors::NightscoutResult;
use nightscout_core::models::{
    EntryRequestBody, GlucoseValue, LastModifiedResponse, NightscoutCollection,
    PostEntryResponseType, RemoteDocument, SetupState,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Synchronization client for one Nightscout server
#[derive(Clone)]
pub struct NightscoutService {
    api: Arc<dyn NightscoutApi>,
    settings: SyncSettings,
    device_name: String,
    app_name: String,
    clock: Arc<dyn Clock>,
}

impl NightscoutService {
    /// Service over `api` using the system clock
    #[must_use]
    pub fn new(
        api: Arc<dyn NightscoutApi>,
        settings: SyncSettings,
        device_name: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            api,
            settings,
            device_name: device_name.into(),
            app_name: app_name.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// HTTP-backed service for the server in `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API root cannot be built from the base URL
    pub fn from_config(config: &NightscoutConfig, settings: SyncSettings) -> NightscoutResult<Self> {
        let api = HttpNightscoutApi::new(config)?;
        info!(api_root = %api.api_root(), "Nightscout service configured");
        Ok(Self::new(
            Arc::new(api),
            settings,
            config.device_name.clone(),
            config.app_name.clone(),
        ))
    }

    /// Replace the clock used for default query bounds
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Query the server status and check its permissions.
    ///
    /// Never fails: every problem becomes a `SetupState::Error` message.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> SetupState {
        let outcome = self.api.status_verbose().await;
        let state = connection::setup_state(&self.settings, outcome);
        match &state {
            SetupState::Success(_) => info!("Nightscout connection test passed"),
            SetupState::Error(message) => info!(%message, "Nightscout connection test failed"),
        }
        state
    }

    /// Per-collection last modification times
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn last_modified(&self) -> NightscoutResult<LastModifiedResponse> {
        self.api.last_modified().await
    }

    /// Upload a new reading
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received
    pub async fn insert(&self, glucose: &GlucoseValue) -> NightscoutResult<PostEntryResponseType> {
        let body = self.entry_body(glucose);
        let response = self
            .api
            .insert_entry(NightscoutCollection::Entries, &body)
            .await?;
        Ok(to_response_type(response))
    }

    /// Update a reading, inserting it when it has no remote identifier
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received
    pub async fn update(&self, glucose: &GlucoseValue) -> NightscoutResult<PostEntryResponseType> {
        let Some(id) = glucose.nightscout_id() else {
            debug!(local_id = glucose.id, "No remote id, inserting instead of updating");
            return self.insert(glucose).await;
        };

        let body = self.entry_body(glucose);
        let response = self
            .api
            .update_entry(NightscoutCollection::Entries, id, &body)
            .await?;
        Ok(to_response_type(response))
    }

    /// Delete a reading remotely; `None` when it was never uploaded
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received
    pub async fn delete(
        &self,
        glucose: &GlucoseValue,
    ) -> NightscoutResult<Option<PostEntryResponseType>> {
        let Some(id) = glucose.nightscout_id() else {
            debug!(local_id = glucose.id, "No remote id, nothing to delete");
            return Ok(None);
        };

        let response = self
            .api
            .delete_entry(NightscoutCollection::Entries, id)
            .await?;
        Ok(Some(to_response_type(response)))
    }

    /// One page of documents dated at or after `from`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an undecodable page
    pub async fn get_by_date(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        self.api.get_by_date(collection, from, sort, limit).await
    }

    /// `get_by_date` sorted by `date` with the default page size
    ///
    /// # Errors
    ///
    /// See [`Self::get_by_date`]
    pub async fn get_by_date_default(
        &self,
        collection: NightscoutCollection,
        from: i64,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        self.get_by_date(collection, from, DEFAULT_DATE_SORT, DEFAULT_LIMIT)
            .await
    }

    /// One page of documents modified at or after `from`.
    ///
    /// A `from` of zero means "no cursor yet" and is replaced by two months
    /// before now.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an undecodable page
    pub async fn get_by_last_modified(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        let from = self.modified_lower_bound(from);
        self.api
            .get_by_last_modified(collection, from, sort, limit)
            .await
    }

    /// `get_by_last_modified` sorted by `srvModified` with the default page size
    ///
    /// # Errors
    ///
    /// See [`Self::get_by_last_modified`]
    pub async fn get_by_last_modified_default(
        &self,
        collection: NightscoutCollection,
        from: i64,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        self.get_by_last_modified(collection, from, DEFAULT_MODIFIED_SORT, DEFAULT_LIMIT)
            .await
    }

    fn modified_lower_bound(&self, from: i64) -> i64 {
        if from == 0 {
            self.clock.now_millis() - months_millis(DEFAULT_LOOKBACK_MONTHS)
        } else {
            from
        }
    }

    fn entry_body(&self, glucose: &GlucoseValue) -> EntryRequestBody {
        EntryRequestBody::from_glucose_value(glucose, &self.device_name, &self.app_name)
    }
}

fn to_response_type(response: ApiResponse<()>) -> PostEntryResponseType {
    PostEntryResponseType::new(response.status, response.location)
}
