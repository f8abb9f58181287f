// src/notion/client.rs
//! Notion database client for the root-link table.

use super::parser::parse_root_link_row;
use super::simple_pagination::{fetch_all_pages_simple, PaginatedResponse};
use super::{RootLinkEntry, RootLinkSource};
use crate::api::client::{extract_response_text, normalize_base_url};
use crate::api::parser::parse_api_response;
use crate::constants::{NOTION_API_BASE_URL, NOTION_VERSION};
use crate::error::{AppError, RemoteService};
use crate::types::{ApiToken, DatabaseId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::Value;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
    database_id: DatabaseId,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(token: &ApiToken, database_id: DatabaseId) -> Result<Self, AppError> {
        Self::with_base_url(token, database_id, NOTION_API_BASE_URL)
    }

    pub fn with_base_url(
        token: &ApiToken,
        database_id: DatabaseId,
        base_url: impl Into<String>,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into())?,
            database_id,
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(token: &ApiToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Notion token format: {}", e))
            })?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl RootLinkSource for NotionHttpClient {
    async fn fetch_entries(&self) -> Result<Vec<RootLinkEntry>, AppError> {
        let endpoint = format!("databases/{}/query", self.database_id);
        let pages = fetch_all_pages_simple(|page_size, cursor| {
            let endpoint = endpoint.clone();
            async move {
                let mut query = serde_json::json!({ "page_size": page_size });
                if let Some(cursor) = cursor {
                    query["start_cursor"] = serde_json::json!(cursor);
                }
                let response = self.post(&endpoint, &query).await?;
                let result = extract_response_text(response).await?;
                parse_api_response::<PaginatedResponse<Value>>(result, RemoteService::Notion)
            }
        })
        .await?;

        log::debug!(
            "Read {} root rows in {} pages",
            pages.items.len(),
            pages.pages_fetched
        );
        Ok(pages.items.iter().map(parse_root_link_row).collect())
    }
}
