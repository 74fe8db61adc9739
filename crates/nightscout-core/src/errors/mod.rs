// ABOUTME: Error types for Nightscout transport and service operations
// ABOUTME: Classifies network failures so callers can map them to user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Types
//!
//! - `TransportFailure` - a request that produced no HTTP response at all
//! - `NightscoutError` - everything a service call can fail with

use thiserror::Error;

/// Result alias used across the client
pub type NightscoutResult<T> = Result<T, NightscoutError>;

/// A request that never produced an HTTP response.
///
/// The variants mirror the distinctions the connection test reports to the
/// user: a host that does not resolve, a port that refuses the connection,
/// and everything else, identified by a short kind name.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// DNS lookup for the server host failed
    #[error("unable to resolve host '{host}'")]
    UnknownHost {
        /// Host name that failed to resolve
        host: String,
    },

    /// The host resolved but nothing accepted the connection on the port
    #[error("connection refused by {host}:{port}")]
    PortUnreachable {
        /// Host that refused the connection
        host: String,
        /// Port that was tried
        port: u16,
    },

    /// Any other failure without a response (timeout, TLS, decode, ...)
    #[error("{kind} failure: {message}")]
    Other {
        /// Short, stable name of the failure kind (e.g. "timeout")
        kind: String,
        /// Underlying error text
        message: String,
    },
}

impl TransportFailure {
    /// Create an unclassified failure of the given kind
    #[must_use]
    pub fn other(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Short name of the failure kind, used in "Unknown network error" messages
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::UnknownHost { .. } => "unknown_host",
            Self::PortUnreachable { .. } => "port_unreachable",
            Self::Other { kind, .. } => kind,
        }
    }
}

/// Errors returned by Nightscout service calls
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NightscoutError {
    /// No HTTP response was received
    #[error("transport error: {0}")]
    Transport(#[from] TransportFailure),

    /// The server answered with a non-success status
    #[error("'{endpoint}' returned HTTP {status}")]
    Status {
        /// Route that was called
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Error body text, if any
        body: Option<String>,
    },

    /// A response arrived but could not be interpreted
    #[error("invalid response from '{endpoint}': {reason}")]
    InvalidResponse {
        /// Route that produced the response
        endpoint: String,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration is missing or malformed
    #[error("configuration error for {key}: {reason}")]
    Config {
        /// Configuration key at fault
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// A versioned record points at a record it cannot supersede
    #[error("invalid lineage for record {record}: {reason}")]
    InvalidLineage {
        /// Local id of the offending record
        record: i64,
        /// Why the reference was rejected
        reason: String,
    },
}

impl NightscoutError {
    /// Create an invalid-response error
    #[must_use]
    pub fn invalid_response(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Short name of the error kind, for logs and user-facing fallbacks
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Transport(failure) => failure.kind_name(),
            Self::Status { .. } => "http_status",
            Self::InvalidResponse { .. } => "invalid_response",
            Self::Config { .. } => "config",
            Self::InvalidLineage { .. } => "invalid_lineage",
        }
    }

    /// The transport failure behind this error, if any
    #[must_use]
    pub const fn transport_failure(&self) -> Option<&TransportFailure> {
        match self {
            Self::Transport(failure) => Some(failure),
            _ => None,
        }
    }
}
