// src/api/client.rs
//! Thin HTTP client for the Neos cloud API.
//!
//! Handles URL building and owner routing. Parsing lives in
//! [`parser`](super::parser); crawl logic lives in [`crawler`](super::crawler).

use super::parser::{parse_api_response, parse_record_entries};
use super::responses::{NeosUser, RecordLocation};
use super::{NeosRepository, RecordEntry};
use crate::constants::NEOS_API_BASE_URL;
use crate::error::{AppError, RemoteService};
use crate::types::{OwnerId, OwnerKind, RecordId};
use reqwest::{Client, Response};
use serde_json::Value;

/// A thin wrapper around reqwest Client for Neos API requests.
///
/// The records and user endpoints are public; no credential is sent.
#[derive(Clone)]
pub struct NeosHttpClient {
    client: Client,
    base_url: String,
}

impl NeosHttpClient {
    pub fn new() -> Result<Self, AppError> {
        Self::with_base_url(NEOS_API_BASE_URL)
    }

    /// Point the client at another API root (used against local fakes).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into())?,
        })
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    fn records_endpoint(owner_id: &OwnerId) -> String {
        format!("{}/{}/records", owner_id.kind().namespace(), owner_id)
    }

    async fn fetch_location(
        &self,
        owner_id: &OwnerId,
        record_id: &RecordId,
    ) -> Result<RecordLocation, AppError> {
        let endpoint = format!("{}/{}", Self::records_endpoint(owner_id), record_id);
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parse_api_response(result, RemoteService::Neos)
    }
}

#[async_trait::async_trait]
impl NeosRepository for NeosHttpClient {
    async fn fetch_records(
        &self,
        owner_id: &OwnerId,
        record_id: &RecordId,
    ) -> Result<Vec<RecordEntry>, AppError> {
        let location = self.fetch_location(owner_id, record_id).await?;
        let children_path = location.children_path();

        let response = self
            .get(
                &Self::records_endpoint(owner_id),
                &[("path", children_path.as_str())],
            )
            .await?;
        let result = extract_response_text(response).await?;
        let values: Vec<Value> = parse_api_response(result, RemoteService::Neos)?;
        log::debug!(
            "{} entries under {}/{} ({})",
            values.len(),
            owner_id,
            record_id,
            children_path
        );
        Ok(parse_record_entries(values))
    }

    async fn fetch_user(&self, owner_id: &OwnerId) -> Result<NeosUser, AppError> {
        let endpoint = format!("{}/{}", OwnerKind::User.namespace(), owner_id);
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parse_api_response(result, RemoteService::Neos)
    }
}

/// Validates an API root and strips its trailing slash.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, AppError> {
    let parsed = url::Url::parse(base_url)?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
