// ABOUTME: Shared test helpers for the Nightscout sync integration tests
// ABOUTME: Recording in-memory NightscoutApi, sample readings and status documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use async_trait::async_trait;
use nightscout_sync::config::SyncSettings;
use nightscout_sync::errors::{NightscoutError, NightscoutResult};
use nightscout_sync::models::{
    ApiPermission, ApiPermissions, EntryRequestBody, GlucoseValue, LastModifiedResponse,
    NightscoutCollection, RemoteDocument, StatusResponse,
};
use nightscout_sync::nightscout::{ApiResponse, NightscoutApi, NightscoutService};
use nightscout_sync::TransportFailure;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// One call observed by `MockNightscoutApi`
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Status,
    LastModified,
    Insert(NightscoutCollection, EntryRequestBody),
    Update(NightscoutCollection, String, EntryRequestBody),
    Delete(NightscoutCollection, String),
    ByDate(NightscoutCollection, i64, String, u32),
    ByLastModified(NightscoutCollection, i64, String, u32),
}

type StatusReply = Box<dyn Fn() -> NightscoutResult<ApiResponse<StatusResponse>> + Send + Sync>;

/// In-memory API returning canned responses and recording every call
pub struct MockNightscoutApi {
    calls: Mutex<Vec<RecordedCall>>,
    status: StatusReply,
    write_status: u16,
    write_location: Option<String>,
    write_failure: Option<TransportFailure>,
    documents: Vec<RemoteDocument>,
}

impl Default for MockNightscoutApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status: Box::new(|| Ok(ApiResponse::success(200, status_with("crud", "crud")))),
            write_status: 201,
            write_location: None,
            write_failure: None,
            documents: Vec::new(),
        }
    }
}

impl MockNightscoutApi {
    pub fn with_status_reply(
        reply: impl Fn() -> NightscoutResult<ApiResponse<StatusResponse>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            status: Box::new(reply),
            ..Self::default()
        }
    }

    pub fn with_write_reply(status: u16, location: Option<&str>) -> Self {
        Self {
            write_status: status,
            write_location: location.map(str::to_owned),
            ..Self::default()
        }
    }

    pub fn with_write_failure(failure: TransportFailure) -> Self {
        Self {
            write_failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn with_documents(documents: Vec<RemoteDocument>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_reply(&self) -> NightscoutResult<ApiResponse<()>> {
        if let Some(failure) = &self.write_failure {
            return Err(NightscoutError::Transport(failure.clone()));
        }
        let response = if (200..300).contains(&self.write_status) {
            ApiResponse::empty(self.write_status)
        } else {
            ApiResponse::error(self.write_status, Some("rejected".to_owned()))
        };
        Ok(match &self.write_location {
            Some(location) => response.with_location(location.clone()),
            None => response,
        })
    }
}

#[async_trait]
impl NightscoutApi for MockNightscoutApi {
    async fn status_verbose(&self) -> NightscoutResult<ApiResponse<StatusResponse>> {
        self.record(RecordedCall::Status);
        (self.status)()
    }

    async fn last_modified(&self) -> NightscoutResult<LastModifiedResponse> {
        self.record(RecordedCall::LastModified);
        Ok(LastModifiedResponse {
            srv_date: Some(1_700_000_000_000),
            collections: BTreeMap::from([("entries".to_owned(), 1_699_999_000_000)]),
        })
    }

    async fn insert_entry(
        &self,
        collection: NightscoutCollection,
        body: &EntryRequestBody,
    ) -> NightscoutResult<ApiResponse<()>> {
        self.record(RecordedCall::Insert(collection, body.clone()));
        self.write_reply()
    }

    async fn update_entry(
        &self,
        collection: NightscoutCollection,
        id: &str,
        body: &EntryRequestBody,
    ) -> NightscoutResult<ApiResponse<()>> {
        self.record(RecordedCall::Update(collection, id.to_owned(), body.clone()));
        self.write_reply()
    }

    async fn delete_entry(
        &self,
        collection: NightscoutCollection,
        id: &str,
    ) -> NightscoutResult<ApiResponse<()>> {
        self.record(RecordedCall::Delete(collection, id.to_owned()));
        self.write_reply()
    }

    async fn get_by_date(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        self.record(RecordedCall::ByDate(collection, from, sort.to_owned(), limit));
        Ok(self.documents.clone())
    }

    async fn get_by_last_modified(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        self.record(RecordedCall::ByLastModified(
            collection,
            from,
            sort.to_owned(),
            limit,
        ));
        Ok(self.documents.clone())
    }
}

/// Status document granting `device_status` on devicestatus and `entries` on entries
pub fn status_with(device_status: &str, entries: &str) -> StatusResponse {
    StatusResponse {
        version: Some("15.0.2".to_owned()),
        api_version: Some("3.0.4-alpha".to_owned()),
        srv_date: Some(1_700_000_000_000),
        storage: None,
        api_permissions: ApiPermissions {
            device_status: ApiPermission::parse(device_status),
            entries: ApiPermission::parse(entries),
            food: ApiPermission::parse("r"),
            profile: ApiPermission::parse("r"),
            settings: ApiPermission::parse("r"),
            treatments: ApiPermission::parse("r"),
        },
    }
}

/// A reading never uploaded
pub fn local_reading() -> GlucoseValue {
    GlucoseValue::new(1_700_000_000_000, 120.0)
}

/// A reading that already has a remote identifier
pub fn uploaded_reading(nightscout_id: &str) -> GlucoseValue {
    local_reading().with_nightscout_id(nightscout_id)
}

/// Service over `api` with default settings and fixed labels
pub fn service_over(api: Arc<MockNightscoutApi>, settings: SyncSettings) -> NightscoutService {
    NightscoutService::new(api, settings, "test-device", "test-app")
}

/// A transport-level failure as the HTTP client would report it
pub fn transport_error(failure: TransportFailure) -> NightscoutError {
    NightscoutError::Transport(failure)
}
