// ABOUTME: Nightscout CLI - command-line front end for the sync client
// ABOUTME: Tests a server connection and fetches collection pages as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Check reachability, credentials and permissions
//! NIGHTSCOUT_URL=https://ns.example.com NIGHTSCOUT_TOKEN=token nightscout-cli test-connection
//!
//! # Show per-collection modification times
//! nightscout-cli last-modified
//!
//! # Fetch entries modified in the last two months
//! nightscout-cli fetch --collection entries --by modified
//!
//! # Fetch treatments dated after a cursor
//! nightscout-cli fetch --collection treatments --from 1700000000000 --limit 50
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use nightscout_sync::config::{NightscoutConfig, SyncSettings};
use nightscout_sync::logging::LoggingConfig;
use nightscout_sync::models::NightscoutCollection;
use nightscout_sync::nightscout::NightscoutService;

#[derive(Parser)]
#[command(
    name = "nightscout-cli",
    about = "Nightscout sync client CLI",
    long_about = "Tests a Nightscout server connection and fetches collection pages. Server settings come from NIGHTSCOUT_* environment variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Server URL override
    #[arg(long, global = true)]
    url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Query the server status and check permissions against the sync settings
    TestConnection,

    /// Show the last modification time of each collection
    LastModified,

    /// Fetch one page of a collection
    Fetch {
        /// Collection name (devicestatus, food, profile, treatments, entries, settings)
        #[arg(long, value_parser = parse_collection)]
        collection: NightscoutCollection,

        /// Cursor field
        #[arg(long, value_enum, default_value_t = Cursor::Date)]
        by: Cursor,

        /// Lower bound, epoch milliseconds (0 = default lookback for `modified`)
        #[arg(long, default_value = "0")]
        from: i64,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Sort key
        #[arg(long)]
        sort: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Cursor {
    /// Document date
    Date,
    /// Server modification time
    Modified,
}

fn parse_collection(value: &str) -> Result<NightscoutCollection, String> {
    value.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let config = NightscoutConfig::from_env_with_url(cli.url.as_deref())?;
    let service = NightscoutService::from_config(&config, SyncSettings::from_env())?;

    match cli.command {
        Command::TestConnection => commands::test_connection(&service).await?,
        Command::LastModified => commands::last_modified(&service).await?,
        Command::Fetch {
            collection,
            by,
            from,
            limit,
            sort,
        } => {
            commands::fetch(
                &service,
                collection,
                matches!(by, Cursor::Modified),
                from,
                sort,
                limit,
            )
            .await?;
        }
    }

    Ok(())
}
