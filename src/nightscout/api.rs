// ABOUTME: Abstract Nightscout remote service consumed by the sync core
// ABOUTME: One method per API route, each a single request/response exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use nightscout_core::errors::NightscoutResult;
use nightscout_core::models::{
    EntryRequestBody, LastModifiedResponse, NightscoutCollection, RemoteDocument, StatusResponse,
};

/// An HTTP response reduced to what the sync core looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// `Location` header, if present
    pub location: Option<String>,
    /// Decoded body of a successful response
    pub body: Option<T>,
    /// Raw body text of an unsuccessful response
    pub error_body: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A 2xx response carrying `body`
    #[must_use]
    pub const fn success(status: u16, body: T) -> Self {
        Self {
            status,
            location: None,
            body: Some(body),
            error_body: None,
        }
    }

    /// A response with a non-success status and optional error text
    #[must_use]
    pub const fn error(status: u16, error_body: Option<String>) -> Self {
        Self {
            status,
            location: None,
            body: None,
            error_body,
        }
    }

    /// Attach a `Location` header value
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Status is in the 2xx range
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl ApiResponse<()> {
    /// A body-less response, as returned by write calls
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            location: None,
            body: None,
            error_body: None,
        }
    }
}

/// Remote Nightscout service.
///
/// Implementations are bound to one server and credential set. Every method
/// issues exactly one request; a response with any HTTP status is `Ok`, and
/// `Err` means no usable response arrived (or, for the range queries and
/// `last_modified`, that the server answered with an error status).
#[async_trait]
pub trait NightscoutApi: Send + Sync {
    /// Fetch the server status, including the caller's permissions
    async fn status_verbose(&self) -> NightscoutResult<ApiResponse<StatusResponse>>;

    /// Last modification time of each collection
    async fn last_modified(&self) -> NightscoutResult<LastModifiedResponse>;

    /// Create a document
    async fn insert_entry(
        &self,
        collection: NightscoutCollection,
        body: &EntryRequestBody,
    ) -> NightscoutResult<ApiResponse<()>>;

    /// Replace the document with identifier `id`
    async fn update_entry(
        &self,
        collection: NightscoutCollection,
        id: &str,
        body: &EntryRequestBody,
    ) -> NightscoutResult<ApiResponse<()>>;

    /// Delete the document with identifier `id`
    async fn delete_entry(
        &self,
        collection: NightscoutCollection,
        id: &str,
    ) -> NightscoutResult<ApiResponse<()>>;

    /// Documents dated at or after `from`, one page
    async fn get_by_date(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>>;

    /// Documents modified on the server at or after `from`, one page
    async fn get_by_last_modified(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>>;
}
