// src/lib.rs
//! notion-unlimited: pagination-free access to Notion list endpoints.
//!
//! Notion's list and query endpoints return at most 100 records per call
//! plus a continuation cursor. [`Unlimited`] wraps any [`NotionEndpoints`]
//! implementation and follows those cursors to the end, returning one
//! response with every record, `has_more == false` and no `next_cursor`.
//!
//! # Public API
//!
//! - **Aggregation** — [`drain`], [`Unlimited`], [`DatabaseQueryAll`]
//! - **Endpoints** — [`NotionEndpoints`], [`NotionHttpClient`]
//! - **Wire types** — [`ListResponse`], [`Paginated`], parameter bundles
//! - **Configuration** — [`ClientConfig`], CLI input ([`CommandLineInput`], [`RunConfig`])
//! - **Errors** — [`AppError`], [`NotionErrorCode`], [`ValidationError`]

mod api;
mod config;
mod constants;
mod error;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{ClientConfig, CommandLineInput, ListCommand, ListRequest, RunConfig};
pub use crate::constants::{NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_API_VERSION};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, PageSize};

// --- Aggregation ---
pub use crate::api::pagination::drain;
pub use crate::api::unlimited::{DatabaseQueryAll, Unlimited};

// --- Endpoints ---
pub use crate::api::client::{ApiResponse, NotionHttpClient};
pub use crate::api::parser::{parse_api_response, parse_list_page};
pub use crate::api::types::{
    ListBlockChildrenParameters, ListBlockChildrenResponse, ListDatabasesParameters,
    ListDatabasesResponse, ListObject, ListResponse, ListUsersParameters, ListUsersResponse,
    Paginated, QueryDatabaseParameters, QueryDatabaseResponse, SearchParameters, SearchResponse,
};
pub use crate::api::NotionEndpoints;
