// src/api/unlimited.rs
//! Pagination-free variants of every list endpoint.
//!
//! Each method takes the same parameters as its single-page counterpart and
//! returns the same response shape, but with every record of the listing,
//! `has_more == false` and no `next_cursor`.

use super::pagination::drain;
use super::types::{
    ListBlockChildrenParameters, ListBlockChildrenResponse, ListDatabasesParameters,
    ListDatabasesResponse, ListUsersParameters, ListUsersResponse, QueryDatabaseParameters,
    QueryDatabaseResponse, SearchParameters, SearchResponse,
};
use super::NotionEndpoints;
use crate::error::AppError;

/// Drained view over a [`NotionEndpoints`] implementation.
#[derive(Debug, Clone)]
pub struct Unlimited<C> {
    endpoints: C,
}

impl<C: NotionEndpoints> Unlimited<C> {
    pub fn new(endpoints: C) -> Self {
        Self { endpoints }
    }

    /// The wrapped single-page endpoints.
    pub fn endpoints(&self) -> &C {
        &self.endpoints
    }

    pub fn into_inner(self) -> C {
        self.endpoints
    }

    /// Retrieve every child block of a block.
    pub async fn list_block_children(
        &self,
        params: ListBlockChildrenParameters,
    ) -> Result<ListBlockChildrenResponse, AppError> {
        let endpoints = &self.endpoints;
        log::debug!("Draining children of block {}", params.block_id);
        drain(move |page| endpoints.list_block_children(page), params).await
    }

    /// Query every row of a database.
    pub async fn query_database(
        &self,
        params: QueryDatabaseParameters,
    ) -> Result<QueryDatabaseResponse, AppError> {
        let endpoints = &self.endpoints;
        log::debug!("Draining query of database {}", params.database_id);
        drain(move |page| endpoints.query_database(page), params).await
    }

    /// List every database shared with the integration.
    #[deprecated(note = "Notion deprecated GET /databases; use `search` with a database filter")]
    pub async fn list_databases(
        &self,
        params: ListDatabasesParameters,
    ) -> Result<ListDatabasesResponse, AppError> {
        let endpoints = &self.endpoints;
        drain(move |page| endpoints.list_databases(page), params).await
    }

    /// List every user of the workspace.
    pub async fn list_users(
        &self,
        params: ListUsersParameters,
    ) -> Result<ListUsersResponse, AppError> {
        let endpoints = &self.endpoints;
        drain(move |page| endpoints.list_users(page), params).await
    }

    /// Every page and database matching a search.
    pub async fn search(&self, params: SearchParameters) -> Result<SearchResponse, AppError> {
        let endpoints = &self.endpoints;
        drain(move |page| endpoints.search(page), params).await
    }
}

/// Only the drained database query, for callers that need nothing else.
#[derive(Debug, Clone)]
pub struct DatabaseQueryAll<C> {
    endpoints: C,
}

impl<C: NotionEndpoints> DatabaseQueryAll<C> {
    pub fn new(endpoints: C) -> Self {
        Self { endpoints }
    }

    /// Query every row of a database.
    pub async fn query_all(
        &self,
        params: QueryDatabaseParameters,
    ) -> Result<QueryDatabaseResponse, AppError> {
        let endpoints = &self.endpoints;
        drain(move |page| endpoints.query_database(page), params).await
    }
}
