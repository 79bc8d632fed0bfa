// src/api/types.rs
//! Type definitions for the Notion list endpoints.
//!
//! Every list/query endpoint shares one response envelope and one cursor
//! field; only the parameter bundles differ. Records are kept as opaque JSON.

use crate::types::{NotionId, PageSize};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- Response envelope ---

/// The `object` discriminator of a list response. Only `"list"` is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListObject {
    #[default]
    List,
}

/// One page of a cursor-paginated list, or a fully drained list.
///
/// `metadata` holds every other top-level field the endpoint returns
/// (e.g. `"type": "block"` and `"block": {}`), preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T = Value> {
    pub object: ListObject,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl<T> ListResponse<T> {
    /// A terminal page holding `results` and no continuation.
    pub fn terminal(results: Vec<T>) -> Self {
        Self {
            object: ListObject::List,
            results,
            next_cursor: None,
            has_more: false,
            metadata: Map::new(),
        }
    }

    /// A non-terminal page whose continuation is `next_cursor`.
    pub fn continued(results: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            has_more: true,
            next_cursor,
            ..Self::terminal(results)
        }
    }

    /// Adds a top-level metadata field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The `type` discriminator, when the endpoint sends one.
    pub fn list_type(&self) -> Option<&str> {
        self.metadata.get("type").and_then(Value::as_str)
    }
}

pub type ListBlockChildrenResponse = ListResponse;
pub type QueryDatabaseResponse = ListResponse;
pub type ListDatabasesResponse = ListResponse;
pub type ListUsersResponse = ListResponse;
pub type SearchResponse = ListResponse;

// --- Cursor contract ---

/// A parameter bundle carrying the `start_cursor` of a paged request.
///
/// Draining only ever touches this field; everything else in the bundle is
/// forwarded to every page request unchanged.
pub trait Paginated: Clone {
    fn start_cursor(&self) -> Option<&str>;
    fn set_start_cursor(&mut self, cursor: Option<String>);
}

macro_rules! impl_paginated {
    ($($params:ty),+ $(,)?) => {
        $(
            impl Paginated for $params {
                fn start_cursor(&self) -> Option<&str> {
                    self.start_cursor.as_deref()
                }

                fn set_start_cursor(&mut self, cursor: Option<String>) {
                    self.start_cursor = cursor;
                }
            }
        )+
    };
}

impl_paginated!(
    ListBlockChildrenParameters,
    QueryDatabaseParameters,
    ListDatabasesParameters,
    ListUsersParameters,
    SearchParameters,
);

// --- Parameter bundles ---

/// `GET /blocks/{block_id}/children`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListBlockChildrenParameters {
    #[serde(skip)]
    pub block_id: NotionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

impl ListBlockChildrenParameters {
    pub fn new(block_id: NotionId) -> Self {
        Self {
            block_id,
            start_cursor: None,
            page_size: None,
        }
    }
}

/// `POST /databases/{database_id}/query`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDatabaseParameters {
    #[serde(skip)]
    pub database_id: NotionId,
    /// Sent as repeated `filter_properties` query parameters, not in the body.
    #[serde(skip)]
    pub filter_properties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

impl QueryDatabaseParameters {
    pub fn new(database_id: NotionId) -> Self {
        Self {
            database_id,
            filter_properties: Vec::new(),
            filter: None,
            sorts: None,
            archived: None,
            start_cursor: None,
            page_size: None,
        }
    }
}

/// `GET /databases`, deprecated by Notion in favour of search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListDatabasesParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

/// `GET /users`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListUsersParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

/// `POST /search`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

/// Query-string pairs for GET endpoints, which take no body.
pub(crate) fn cursor_query(
    start_cursor: Option<&str>,
    page_size: Option<PageSize>,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(cursor) = start_cursor {
        query.push(("start_cursor", cursor.to_string()));
    }
    if let Some(size) = page_size {
        query.push(("page_size", size.to_string()));
    }
    query
}
