// ABOUTME: Outcomes of Nightscout write calls and connection tests
// ABOUTME: Translates numeric HTTP statuses into an enumerated response code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ApiPermissions;
use serde::{Deserialize, Serialize};

/// Enumerated HTTP outcome of a write call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCode {
    /// 200: the document already existed (deduplicated) or was updated
    RecordExists,
    /// 201: the document was created
    RecordCreated,
    /// 204: the document was deleted
    RecordDeleted,
    /// 304: nothing changed since the given time
    NotModified,
    /// 400: the body failed server validation
    ValidationError,
    /// 401: missing or invalid credentials
    Unauthorized,
    /// 403: credentials lack the required permission
    Forbidden,
    /// 404: no such document or collection
    NotFound,
    /// 410: the document was deleted before
    Gone,
    /// 422: the body was well-formed but rejected
    Unprocessable,
    /// 500: server failure
    InternalServerError,
    /// Any other status
    Other(u16),
}

impl ResponseCode {
    /// Map a numeric HTTP status
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            200 => Self::RecordExists,
            201 => Self::RecordCreated,
            204 => Self::RecordDeleted,
            304 => Self::NotModified,
            400 => Self::ValidationError,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            410 => Self::Gone,
            422 => Self::Unprocessable,
            500 => Self::InternalServerError,
            other => Self::Other(other),
        }
    }

    /// The numeric HTTP status this code was derived from
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::RecordExists => 200,
            Self::RecordCreated => 201,
            Self::RecordDeleted => 204,
            Self::NotModified => 304,
            Self::ValidationError => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Gone => 410,
            Self::Unprocessable => 422,
            Self::InternalServerError => 500,
            Self::Other(status) => status,
        }
    }

    /// The server accepted the write
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self.status(), 200..=299)
    }
}

impl From<u16> for ResponseCode {
    fn from(status: u16) -> Self {
        Self::from_status(status)
    }
}

/// Result of an insert, update or delete call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEntryResponseType {
    /// Enumerated HTTP outcome
    pub code: ResponseCode,
    /// Value of the `Location` response header, if the server sent one
    pub location: Option<String>,
}

impl PostEntryResponseType {
    /// Build from a raw status and optional location
    #[must_use]
    pub const fn new(status: u16, location: Option<String>) -> Self {
        Self {
            code: ResponseCode::from_status(status),
            location,
        }
    }
}

/// Outcome of a connection test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail")]
pub enum SetupState {
    /// The server is reachable and grants every required permission
    Success(ApiPermissions),
    /// Human-readable reason the setup is not usable
    Error(String),
}

impl SetupState {
    /// The test passed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The error message, if the test failed
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(message) => Some(message),
        }
    }
}
