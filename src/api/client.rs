// src/api/client.rs
//! HTTP binding of the Notion list endpoints.
//!
//! A thin wrapper around reqwest: authentication headers, URL construction
//! and one request per call. Each method fetches exactly one page; draining
//! lives in [`super::unlimited`].

use super::parser::parse_list_page;
use super::types::{
    cursor_query, ListBlockChildrenParameters, ListBlockChildrenResponse,
    ListDatabasesParameters, ListDatabasesResponse, ListUsersParameters, ListUsersResponse,
    QueryDatabaseParameters, QueryDatabaseResponse, SearchParameters, SearchResponse,
};
use super::NotionEndpoints;
use crate::config::ClientConfig;
use crate::error::AppError;
use reqwest::{header, Client, Request, Response};
use serde::Serialize;
use url::Url;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(config)?)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(config: &ClientConfig) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", config.api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(&config.notion_version).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Notion-Version header: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Builds a GET request to `endpoint` with the given query-string pairs.
    pub fn get_request(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Request, AppError> {
        let url = endpoint_url(&self.base_url, endpoint, query)?;
        Ok(self.client.get(url).build()?)
    }

    /// Builds a POST request with JSON body to `endpoint`.
    pub fn post_request<T: Serialize>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: &T,
    ) -> Result<Request, AppError> {
        let url = endpoint_url(&self.base_url, endpoint, query)?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "   body: {}",
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
            );
        }
        Ok(self.client.post(url).json(body).build()?)
    }

    /// Sends a built request and reads the body.
    pub async fn execute(&self, request: Request) -> Result<ApiResponse<String>, AppError> {
        log::debug!("{} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        extract_response_text(response).await
    }

    fn list_block_children_request(
        &self,
        params: &ListBlockChildrenParameters,
    ) -> Result<Request, AppError> {
        let endpoint = format!("blocks/{}/children", params.block_id.to_hyphenated());
        let query = cursor_query(params.start_cursor.as_deref(), params.page_size);
        self.get_request(&endpoint, &query)
    }

    /// `filter_properties` travels in the query string; everything else,
    /// cursor included, in the body.
    fn query_database_request(&self, params: &QueryDatabaseParameters) -> Result<Request, AppError> {
        let endpoint = format!("databases/{}/query", params.database_id.to_hyphenated());
        let query: Vec<(&str, String)> = params
            .filter_properties
            .iter()
            .map(|property| ("filter_properties", property.clone()))
            .collect();
        self.post_request(&endpoint, &query, params)
    }

    fn list_databases_request(&self, params: &ListDatabasesParameters) -> Result<Request, AppError> {
        let query = cursor_query(params.start_cursor.as_deref(), params.page_size);
        self.get_request("databases", &query)
    }

    fn list_users_request(&self, params: &ListUsersParameters) -> Result<Request, AppError> {
        let query = cursor_query(params.start_cursor.as_deref(), params.page_size);
        self.get_request("users", &query)
    }

    fn search_request(&self, params: &SearchParameters) -> Result<Request, AppError> {
        self.post_request("search", &[], params)
    }
}

/// Joins `endpoint` onto the API root and appends `query`.
pub(crate) fn endpoint_url(
    base_url: &Url,
    endpoint: &str,
    query: &[(&str, String)],
) -> Result<Url, AppError> {
    let mut url = base_url.join(endpoint.trim_start_matches('/'))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[async_trait::async_trait]
impl NotionEndpoints for NotionHttpClient {
    async fn list_block_children(
        &self,
        params: ListBlockChildrenParameters,
    ) -> Result<ListBlockChildrenResponse, AppError> {
        let request = self.list_block_children_request(&params)?;
        parse_list_page(self.execute(request).await?)
    }

    async fn query_database(
        &self,
        params: QueryDatabaseParameters,
    ) -> Result<QueryDatabaseResponse, AppError> {
        let request = self.query_database_request(&params)?;
        parse_list_page(self.execute(request).await?)
    }

    async fn list_databases(
        &self,
        params: ListDatabasesParameters,
    ) -> Result<ListDatabasesResponse, AppError> {
        let request = self.list_databases_request(&params)?;
        parse_list_page(self.execute(request).await?)
    }

    async fn list_users(&self, params: ListUsersParameters) -> Result<ListUsersResponse, AppError> {
        let request = self.list_users_request(&params)?;
        parse_list_page(self.execute(request).await?)
    }

    async fn search(&self, params: SearchParameters) -> Result<SearchResponse, AppError> {
        let request = self.search_request(&params)?;
        parse_list_page(self.execute(request).await?)
    }
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
