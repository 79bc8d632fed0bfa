// src/api/mod.rs
//! Notion API interaction: single-page list endpoints and their drained
//! ("unlimited") counterparts.

pub mod client;
pub mod pagination;
pub mod parser;
pub mod types;
pub mod unlimited;

use crate::error::AppError;
use types::{
    ListBlockChildrenParameters, ListBlockChildrenResponse, ListDatabasesParameters,
    ListDatabasesResponse, ListUsersParameters, ListUsersResponse, QueryDatabaseParameters,
    QueryDatabaseResponse, SearchParameters, SearchResponse,
};

/// The cursor-paginated list endpoints of a Notion workspace.
///
/// Each method fetches exactly one page. Implementations own transport,
/// authentication and any retry policy; [`unlimited::Unlimited`] builds the
/// drained variants on top of any implementation.
#[async_trait::async_trait]
pub trait NotionEndpoints: Send + Sync {
    async fn list_block_children(
        &self,
        params: ListBlockChildrenParameters,
    ) -> Result<ListBlockChildrenResponse, AppError>;

    async fn query_database(
        &self,
        params: QueryDatabaseParameters,
    ) -> Result<QueryDatabaseResponse, AppError>;

    /// Deprecated by Notion; prefer [`NotionEndpoints::search`] with a
    /// database filter.
    async fn list_databases(
        &self,
        params: ListDatabasesParameters,
    ) -> Result<ListDatabasesResponse, AppError>;

    async fn list_users(&self, params: ListUsersParameters) -> Result<ListUsersResponse, AppError>;

    async fn search(&self, params: SearchParameters) -> Result<SearchResponse, AppError>;
}

#[async_trait::async_trait]
impl<C> NotionEndpoints for std::sync::Arc<C>
where
    C: NotionEndpoints + ?Sized,
{
    async fn list_block_children(
        &self,
        params: ListBlockChildrenParameters,
    ) -> Result<ListBlockChildrenResponse, AppError> {
        (**self).list_block_children(params).await
    }

    async fn query_database(
        &self,
        params: QueryDatabaseParameters,
    ) -> Result<QueryDatabaseResponse, AppError> {
        (**self).query_database(params).await
    }

    async fn list_databases(
        &self,
        params: ListDatabasesParameters,
    ) -> Result<ListDatabasesResponse, AppError> {
        (**self).list_databases(params).await
    }

    async fn list_users(&self, params: ListUsersParameters) -> Result<ListUsersResponse, AppError> {
        (**self).list_users(params).await
    }

    async fn search(&self, params: SearchParameters) -> Result<SearchResponse, AppError> {
        (**self).search(params).await
    }
}
