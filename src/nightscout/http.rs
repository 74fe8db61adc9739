// ABOUTME: reqwest-backed implementation of the Nightscout API v3 routes
// ABOUTME: Adds credentials and Date headers, classifies failures that produce no response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::api::{ApiResponse, NightscoutApi};
use crate::config::NightscoutConfig;
use crate::utils::http_client::create_client;
use async_trait::async_trait;
use chrono::Utc;
use nightscout_core::constants::api;
use nightscout_core::errors::{NightscoutError, NightscoutResult, TransportFailure};
use nightscout_core::models::{
    EntryRequestBody, LastModifiedResponse, NightscoutCollection, RemoteDocument, StatusResponse,
};
use reqwest::header::{AUTHORIZATION, DATE, LOCATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::error::Error as _;
use std::io;
use tracing::{debug, warn};
use url::Url;

/// Nightscout API client over HTTP
#[derive(Clone)]
pub struct HttpNightscoutApi {
    client: Client,
    api_root: Url,
    token: Option<String>,
}

impl HttpNightscoutApi {
    /// Create a client for the server described by `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API root cannot be derived from the base URL
    pub fn new(config: &NightscoutConfig) -> NightscoutResult<Self> {
        Self::with_client(config, create_client(&config.http))
    }

    /// Create a client reusing an existing `reqwest::Client`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API root cannot be derived from the base URL
    pub fn with_client(config: &NightscoutConfig, client: Client) -> NightscoutResult<Self> {
        let api_root = config.base_url.join(api::API_V3_PREFIX).map_err(|e| {
            NightscoutError::config("NIGHTSCOUT_URL", format!("cannot derive API root: {e}"))
        })?;

        Ok(Self {
            client,
            api_root,
            token: config.token.clone(),
        })
    }

    /// Root all routes are resolved against
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn url(&self, path: &str) -> NightscoutResult<Url> {
        self.api_root.join(path).map_err(|e| {
            NightscoutError::invalid_response(path, format!("cannot build request URL: {e}"))
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(DATE, Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string());

        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, url: &Url) -> NightscoutResult<Response> {
        let response = builder.send().await.map_err(|e| {
            let failure = classify_failure(&e, url);
            warn!(url = %url.path(), kind = failure.kind_name(), error = %e, "Nightscout request failed");
            failure
        })?;
        debug!(url = %url.path(), status = response.status().as_u16(), "Nightscout response");
        Ok(response)
    }

    async fn json_body(response: Response, url: &Url) -> NightscoutResult<Value> {
        response
            .json::<Value>()
            .await
            .map_err(|e| NightscoutError::from(classify_failure(&e, url)))
    }

    async fn write(
        &self,
        method: Method,
        path: &str,
        body: Option<&EntryRequestBody>,
    ) -> NightscoutResult<ApiResponse<()>> {
        let url = self.url(path)?;
        let builder = match body {
            Some(body) => self.request(method, url.clone()).json(body),
            None => self.request(method, url.clone()),
        };
        let response = self.send(builder, &url).await?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let api_response = if response.status().is_success() {
            ApiResponse::empty(status)
        } else {
            ApiResponse::error(status, error_text(response).await)
        };

        Ok(match location {
            Some(location) => api_response.with_location(location),
            None => api_response,
        })
    }

    async fn query(
        &self,
        collection: NightscoutCollection,
        filter: &str,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        let url = self.url(collection.as_str())?;
        let builder = self.request(Method::GET, url.clone()).query(&[
            (filter, from.to_string()),
            ("sort", sort.to_owned()),
            ("limit", limit.to_string()),
        ]);
        let response = self.send(builder, &url).await?;

        if !response.status().is_success() {
            return Err(NightscoutError::Status {
                endpoint: collection.as_str().to_owned(),
                status: response.status().as_u16(),
                body: error_text(response).await,
            });
        }

        let value = Self::json_body(response, &url).await?;
        RemoteDocument::page_from_value(value)
            .map_err(|e| NightscoutError::invalid_response(collection.as_str(), e.to_string()))
    }
}

#[async_trait]
impl NightscoutApi for HttpNightscoutApi {
    async fn status_verbose(&self) -> NightscoutResult<ApiResponse<StatusResponse>> {
        let url = self.url(api::STATUS)?;
        let response = self.send(self.request(Method::GET, url.clone()), &url).await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            return Ok(ApiResponse::error(status, error_text(response).await));
        }

        let value = Self::json_body(response, &url).await?;
        let body = StatusResponse::from_value(value)
            .map_err(|e| TransportFailure::other("decode", e.to_string()))?;
        Ok(ApiResponse::success(status, body))
    }

    async fn last_modified(&self) -> NightscoutResult<LastModifiedResponse> {
        let url = self.url(api::LAST_MODIFIED)?;
        let response = self.send(self.request(Method::GET, url.clone()), &url).await?;

        if !response.status().is_success() {
            return Err(NightscoutError::Status {
                endpoint: api::LAST_MODIFIED.to_owned(),
                status: response.status().as_u16(),
                body: error_text(response).await,
            });
        }

        let value = Self::json_body(response, &url).await?;
        LastModifiedResponse::from_value(value)
            .map_err(|e| NightscoutError::invalid_response(api::LAST_MODIFIED, e.to_string()))
    }

    async fn insert_entry(
        &self,
        collection: NightscoutCollection,
        body: &EntryRequestBody,
    ) -> NightscoutResult<ApiResponse<()>> {
        self.write(Method::POST, collection.as_str(), Some(body))
            .await
    }

    async fn update_entry(
        &self,
        collection: NightscoutCollection,
        id: &str,
        body: &EntryRequestBody,
    ) -> NightscoutResult<ApiResponse<()>> {
        self.write(Method::PUT, &document_path(collection, id), Some(body))
            .await
    }

    async fn delete_entry(
        &self,
        collection: NightscoutCollection,
        id: &str,
    ) -> NightscoutResult<ApiResponse<()>> {
        self.write(Method::DELETE, &document_path(collection, id), None)
            .await
    }

    async fn get_by_date(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        self.query(collection, api::DATE_GTE_PARAM, from, sort, limit)
            .await
    }

    async fn get_by_last_modified(
        &self,
        collection: NightscoutCollection,
        from: i64,
        sort: &str,
        limit: u32,
    ) -> NightscoutResult<Vec<RemoteDocument>> {
        self.query(collection, api::SRV_MODIFIED_GTE_PARAM, from, sort, limit)
            .await
    }
}

/// `{collection}/{id}`, with the identifier percent-encoded as one path segment
fn document_path(collection: NightscoutCollection, id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{}/{}", collection.as_str(), encoded.replace('+', "%20"))
}

/// Body text of an error response; an empty body stays `Some("")`, `None` only when unreadable
async fn error_text(response: Response) -> Option<String> {
    response.text().await.ok()
}

/// Map a reqwest error to the failure kinds the connection test reports
pub(crate) fn classify_failure(error: &reqwest::Error, url: &Url) -> TransportFailure {
    let host = url.host_str().unwrap_or_default().to_owned();

    if error.is_timeout() {
        return TransportFailure::other("timeout", error.to_string());
    }

    if error.is_connect() {
        let mut causes = std::iter::successors(error.source(), |&cause| cause.source());
        if let Some(kind) = causes.find_map(|cause| {
            if let Some(io_error) = cause.downcast_ref::<io::Error>() {
                if io_error.kind() == io::ErrorKind::ConnectionRefused {
                    return Some(io::ErrorKind::ConnectionRefused);
                }
            }
            is_dns_failure(&cause.to_string()).then_some(io::ErrorKind::NotFound)
        }) {
            return if kind == io::ErrorKind::ConnectionRefused {
                TransportFailure::PortUnreachable {
                    host,
                    port: url.port_or_known_default().unwrap_or_default(),
                }
            } else {
                TransportFailure::UnknownHost { host }
            };
        }
        return TransportFailure::other("connect", error.to_string());
    }

    let kind = if error.is_decode() {
        "decode"
    } else if error.is_body() {
        "body"
    } else if error.is_redirect() {
        "redirect"
    } else if error.is_builder() {
        "builder"
    } else if error.is_request() {
        "request"
    } else {
        "unknown"
    };
    TransportFailure::other(kind, error.to_string())
}

fn is_dns_failure(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    [
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "nodename nor servname",
        "no such host",
    ]
    .iter()
    .any(|needle| message.contains(needle))
}
