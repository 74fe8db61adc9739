// ABOUTME: Maps a status request outcome to the SetupState shown to the user
// ABOUTME: Covers permission violations, HTTP error codes and transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::api::ApiResponse;
use super::permissions::PermissionEvaluator;
use crate::config::SyncSettings;
use nightscout_core::constants::messages;
use nightscout_core::errors::{NightscoutError, NightscoutResult, TransportFailure};
use nightscout_core::models::{SetupState, StatusResponse};

/// HTTP 401
const UNAUTHORIZED: u16 = 401;

/// Turn the result of a status request into a terminal `SetupState`
#[must_use]
pub fn setup_state(
    settings: &SyncSettings,
    outcome: NightscoutResult<ApiResponse<StatusResponse>>,
) -> SetupState {
    match outcome {
        Ok(response) if response.is_successful() => match response.body {
            Some(status) => handle_success(settings, status),
            None => handle_failure(&TransportFailure::other("decode", "empty status body").into()),
        },
        Ok(response) => handle_error(response.status, response.error_body.as_deref()),
        Err(error) => handle_failure(&error),
    }
}

/// Accept the status if every permission rule holds
#[must_use]
pub fn handle_success(settings: &SyncSettings, status: StatusResponse) -> SetupState {
    let errors = PermissionEvaluator::new(settings).evaluate(&status);
    if errors.is_empty() {
        SetupState::Success(status.api_permissions)
    } else {
        SetupState::Error(errors.join("\n"))
    }
}

/// Message for a non-2xx status response
#[must_use]
pub fn handle_error(code: u16, body: Option<&str>) -> SetupState {
    let message = if code == UNAUTHORIZED {
        let body = body.unwrap_or_default();
        if body.contains(messages::BAD_ACCESS_TOKEN_MESSAGE) {
            messages::CHECK_CREDENTIALS.to_owned()
        } else if body.contains(messages::TIME_HEADER_TOLERANCE_MESSAGE) {
            messages::TIME_OUT_OF_SYNC.to_owned()
        } else {
            messages::UNAUTHORIZED.to_owned()
        }
    } else {
        format!(
            "{} {code}, {}",
            messages::NETWORK_ERROR_CODE,
            body.unwrap_or("null")
        )
    };
    SetupState::Error(message)
}

/// Message for a status request that produced no response
#[must_use]
pub fn handle_failure(error: &NightscoutError) -> SetupState {
    let message = match error.transport_failure() {
        Some(TransportFailure::UnknownHost { .. }) => messages::OFFLINE_OR_WRONG_URL.to_owned(),
        Some(TransportFailure::PortUnreachable { .. }) => messages::WRONG_PORT.to_owned(),
        Some(failure) => format!("{} {}", messages::UNKNOWN_NETWORK_ERROR, failure.kind_name()),
        None => format!("{} {}", messages::UNKNOWN_NETWORK_ERROR, error.kind_name()),
    };
    SetupState::Error(message)
}
