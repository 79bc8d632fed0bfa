// src/api/pagination.rs
//! Draining a cursor chain into a single list response.

use super::types::{ListResponse, Paginated};
use std::future::Future;

/// Follows `next_cursor` until the source reports no more pages and folds
/// every page into one response.
///
/// `operation` is invoked once per page, strictly in sequence, starting from
/// `params` (a `start_cursor` already present in `params` is honored, so a
/// partial scan can be resumed). The returned response carries the results
/// of all pages in fetch order; every other field comes from the last page.
/// A first page with `has_more == false` is returned untouched.
///
/// The first failing page aborts the drain and its error is returned as-is;
/// nothing fetched before it is kept.
///
/// A page reporting `has_more` without a `next_cursor` is followed with an
/// absent cursor, which the API treats as "start from the beginning".
pub async fn drain<P, T, E, F, Fut>(mut operation: F, mut params: P) -> Result<ListResponse<T>, E>
where
    P: Paginated,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<ListResponse<T>, E>>,
{
    let mut results = Vec::new();
    let mut pages_fetched = 0u32;

    loop {
        let page = operation(params.clone()).await?;
        pages_fetched += 1;

        log::debug!(
            "Fetched page {} ({} results, has_more: {})",
            pages_fetched,
            page.results.len(),
            page.has_more
        );

        if !page.has_more {
            if pages_fetched == 1 {
                return Ok(page);
            }
            results.extend(page.results);
            log::debug!(
                "Drained {} pages into {} results",
                pages_fetched,
                results.len()
            );
            return Ok(ListResponse { results, ..page });
        }

        if page.next_cursor.is_none() {
            log::warn!(
                "Page {} reports has_more without a next_cursor; continuing from the default start",
                pages_fetched
            );
        }

        params.set_start_cursor(page.next_cursor);
        results.extend(page.results);
    }
}
