// ABOUTME: Subcommand implementations for nightscout-cli
// ABOUTME: Each command runs one service call and prints the result as JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use nightscout_sync::constants::query::{DEFAULT_DATE_SORT, DEFAULT_LIMIT, DEFAULT_MODIFIED_SORT};
use nightscout_sync::models::{NightscoutCollection, SetupState};
use nightscout_sync::nightscout::NightscoutService;
use serde::Serialize;
use tracing::info;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the connection test; exits non-zero when the setup is unusable
pub async fn test_connection(service: &NightscoutService) -> Result<()> {
    let state = service.test_connection().await;
    print_json(&state)?;
    if let SetupState::Error(message) = state {
        bail!("connection test failed: {message}");
    }
    Ok(())
}

/// Print per-collection modification times
pub async fn last_modified(service: &NightscoutService) -> Result<()> {
    let response = service.last_modified().await?;
    print_json(&response)
}

/// Fetch one page by date or by server modification time
pub async fn fetch(
    service: &NightscoutService,
    collection: NightscoutCollection,
    by_modified: bool,
    from: i64,
    sort: Option<String>,
    limit: Option<u32>,
) -> Result<()> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let documents = if by_modified {
        let sort = sort.as_deref().unwrap_or(DEFAULT_MODIFIED_SORT);
        service
            .get_by_last_modified(collection, from, sort, limit)
            .await?
    } else {
        let sort = sort.as_deref().unwrap_or(DEFAULT_DATE_SORT);
        service.get_by_date(collection, from, sort, limit).await?
    };

    info!(%collection, count = documents.len(), "Fetched documents");
    print_json(&documents)
}
