// ABOUTME: Constants module with domain-separated organization
// ABOUTME: API routes, query defaults, preference keys, and connection-test messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Nightscout API v3 routes, relative to the server base URL
pub mod api {
    /// Prefix of every v3 route
    pub const API_V3_PREFIX: &str = "api/v3/";
    /// Status request (includes `apiPermissions`)
    pub const STATUS: &str = "status";
    /// Per-collection last modification timestamps
    pub const LAST_MODIFIED: &str = "lastModified";
    /// Range filter on the document date
    pub const DATE_GTE_PARAM: &str = "date$gte";
    /// Range filter on the server modification time
    pub const SRV_MODIFIED_GTE_PARAM: &str = "srvModified$gte";
}

/// Defaults for range queries against a collection
pub mod query {
    /// Default sort key for `get_by_date`
    pub const DEFAULT_DATE_SORT: &str = "date";
    /// Default sort key for `get_by_last_modified`
    pub const DEFAULT_MODIFIED_SORT: &str = "srvModified";
    /// Default page size
    pub const DEFAULT_LIMIT: u32 = 1000;
    /// Lookback applied when `get_by_last_modified` starts from zero
    pub const DEFAULT_LOOKBACK_MONTHS: i64 = 2;
    /// Length of a month in the lookback computation
    pub const DAYS_PER_MONTH: i64 = 30;
    /// Milliseconds in a day
    pub const MILLIS_PER_DAY: i64 = 86_400_000;
}

/// Preference keys of the sync-mode store
pub mod preference_keys {
    /// CGM readings (entries collection)
    pub const CGM: &str = "ns_cgm";
    /// Food database
    pub const FOOD: &str = "ns_food";
    /// Profiles
    pub const PROFILE: &str = "ns_profile";
    /// Insulin treatments
    pub const INSULIN: &str = "ns_insulin";
    /// Carbohydrate treatments
    pub const CARBS: &str = "ns_carbs";
    /// Careportal treatments
    pub const CAREPORTAL: &str = "ns_careportal";
    /// Settings documents
    pub const SETTINGS: &str = "ns_settings";
    /// Reduced "client-only" mode flag
    pub const CLIENT_ONLY: &str = "ns_client_only";
}

/// Connection-test messages shown to the user verbatim
pub mod messages {
    /// Fragment of the server's 401 body for an invalid token
    pub const BAD_ACCESS_TOKEN_MESSAGE: &str = "Missing or bad access token or JWT";
    /// Fragment of the server's 401 body for a skewed `Date` header
    pub const TIME_HEADER_TOLERANCE_MESSAGE: &str = "Date header out of tolerance";

    /// Prefix of a permission violation line, followed by the collection label
    // TODO: route user-facing strings through a localization table once one exists
    pub const PERMISSIONS_INSUFFICIENT: &str = "Permissions insufficient for";

    /// 401 with a bad token
    pub const CHECK_CREDENTIALS: &str = "Check credentials token.";
    /// 401 with a skewed clock
    pub const TIME_OUT_OF_SYNC: &str = "Time/date out of sync with server!";
    /// Any other 401
    pub const UNAUTHORIZED: &str = "Unauthorized!";
    /// Host name did not resolve
    pub const OFFLINE_OR_WRONG_URL: &str = "Offline or wrong Nightscout URL?";
    /// Connection to the port was refused
    pub const WRONG_PORT: &str = "Wrong port in Nightscout URL?";
    /// Prefix for unclassified transport failures
    pub const UNKNOWN_NETWORK_ERROR: &str = "Unknown network error:";
    /// Prefix for non-401 HTTP errors
    pub const NETWORK_ERROR_CODE: &str = "Network error code:";
}

/// Wire values written into entry bodies
pub mod entries {
    /// Entry type of a sensor glucose value
    pub const SGV_TYPE: &str = "sgv";
    /// Milliseconds per minute, for `utcOffset` conversion
    pub const MILLIS_PER_MINUTE: i64 = 60_000;
}
