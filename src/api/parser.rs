// src/api/parser.rs
//! Turns raw HTTP responses into list pages or typed errors.
//!
//! Error bodies are decoded with the `notion-client` error envelope so the
//! status, code and request id reported by Notion survive intact.

use super::client::ApiResponse;
use super::types::ListResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use notion_client::objects::error::Error as NotionError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Parse any Notion API response: success bodies into `T`, failures into `AppError`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

/// Parse one page of a list endpoint.
pub fn parse_list_page(result: ApiResponse<String>) -> Result<ListResponse, AppError> {
    parse_api_response(result)
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error_body(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion API error from {}: {} ({})",
            url,
            notion_error.code,
            notion_error.message
        );
        return NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into();
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
