// tests/drain_laws.rs
//! Behaviour of the generic drain against scripted page sources.

use notion_unlimited::{
    drain, AppError, ListResponse, NotionClientError, NotionErrorCode, Paginated,
    SearchParameters,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Serves a fixed sequence of pages and records every request it receives.
struct ScriptedSource {
    pages: Mutex<VecDeque<Result<ListResponse, AppError>>>,
    requests: Mutex<Vec<SearchParameters>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Result<ListResponse, AppError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn fetch(
        &self,
        params: SearchParameters,
    ) -> impl std::future::Future<Output = Result<ListResponse, AppError>> + '_ {
        self.requests.lock().unwrap().push(params);
        async move {
            tokio::task::yield_now().await;
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted source requested past its last page")
        }
    }

    fn cursors(&self) -> Vec<Option<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.start_cursor().map(str::to_string))
            .collect()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn rate_limited() -> AppError {
    NotionClientError::NotionApi {
        status: 429,
        code: "rate_limited".to_string(),
        message: "You have been rate limited.".to_string(),
        request_id: Some("req-2".to_string()),
    }
    .into()
}

#[tokio::test]
async fn three_page_scenario() {
    let source = ScriptedSource::new(vec![
        Ok(ListResponse::continued(vec![json!("a"), json!("b")], Some("c1".into()))),
        Ok(ListResponse::continued(vec![json!("c")], Some("c2".into()))),
        Ok(ListResponse::terminal(vec![json!("d"), json!("e"), json!("f")])),
    ]);
    let src = &source;

    let drained = drain(move |p| src.fetch(p), SearchParameters::default())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&drained).unwrap(),
        json!({
            "object": "list",
            "results": ["a", "b", "c", "d", "e", "f"],
            "has_more": false,
            "next_cursor": null
        })
    );
    assert_eq!(source.calls(), 3);
    assert_eq!(
        source.cursors(),
        vec![None, Some("c1".to_string()), Some("c2".to_string())]
    );
}

#[tokio::test]
async fn empty_source_is_returned_unchanged() {
    let empty = ListResponse::terminal(Vec::new());
    let source = ScriptedSource::new(vec![Ok(empty.clone())]);
    let src = &source;

    let drained = drain(move |p| src.fetch(p), SearchParameters::default())
        .await
        .unwrap();

    assert_eq!(drained, empty);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn metadata_comes_from_the_terminal_page() {
    let source = ScriptedSource::new(vec![
        Ok(ListResponse::continued(vec![json!(1)], Some("c1".into()))
            .with_metadata("type", json!("page"))
            .with_metadata("page", json!({"stale": true}))
            .with_metadata("request_id", json!("first"))),
        Ok(ListResponse::terminal(vec![json!(2)])
            .with_metadata("type", json!("page_or_database"))
            .with_metadata("page_or_database", json!({}))),
    ]);
    let src = &source;

    let drained = drain(move |p| src.fetch(p), SearchParameters::default())
        .await
        .unwrap();

    assert_eq!(drained.list_type(), Some("page_or_database"));
    assert_eq!(drained.metadata.get("page_or_database"), Some(&json!({})));
    assert_eq!(drained.metadata.get("page"), None);
    assert_eq!(drained.metadata.get("request_id"), None);
}

#[tokio::test]
async fn order_is_preserved_across_many_pages() {
    let sizes: Vec<usize> = (0..250).map(|i| i % 7).collect();
    let mut next = 0u64;
    let mut pages = Vec::new();
    for (i, size) in sizes.iter().enumerate() {
        let records: Vec<Value> = (0..*size)
            .map(|_| {
                next += 1;
                json!(next)
            })
            .collect();
        let page = if i + 1 == sizes.len() {
            ListResponse::terminal(records)
        } else {
            ListResponse::continued(records, Some(format!("cursor-{}", i)))
        };
        pages.push(Ok(page));
    }
    let source = ScriptedSource::new(pages);
    let src = &source;

    let drained = drain(move |p| src.fetch(p), SearchParameters::default())
        .await
        .unwrap();

    let expected: Vec<Value> = (1..=next).map(|n| json!(n)).collect();
    assert_eq!(drained.results, expected);
    assert_eq!(source.calls(), sizes.len());
    assert!(!drained.has_more);
}

#[tokio::test]
async fn failing_page_aborts_with_the_same_error() {
    let source = ScriptedSource::new(vec![
        Ok(ListResponse::continued(vec![json!(1)], Some("c1".into()))),
        Err(rate_limited()),
        Ok(ListResponse::terminal(vec![json!(3)])),
    ]);
    let src = &source;

    let err = drain(move |p| src.fetch(p), SearchParameters::default())
        .await
        .unwrap_err();

    match &err {
        AppError::NotionClient(NotionClientError::NotionApi {
            status, request_id, ..
        }) => {
            assert_eq!(*status, 429);
            assert_eq!(request_id.as_deref(), Some("req-2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.notion_code(), Some(NotionErrorCode::RateLimited));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn resumes_from_a_caller_supplied_cursor() {
    let source = ScriptedSource::new(vec![
        Ok(ListResponse::continued(vec![json!("m")], Some("c8".into()))),
        Ok(ListResponse::terminal(vec![json!("n")])),
    ]);
    let src = &source;
    let params = SearchParameters {
        query: Some("roadmap".to_string()),
        start_cursor: Some("c7".to_string()),
        ..Default::default()
    };

    let drained = drain(move |p| src.fetch(p), params).await.unwrap();

    assert_eq!(drained.results, vec![json!("m"), json!("n")]);
    assert_eq!(
        source.cursors(),
        vec![Some("c7".to_string()), Some("c8".to_string())]
    );
    assert!(source
        .requests
        .lock()
        .unwrap()
        .iter()
        .all(|p| p.query.as_deref() == Some("roadmap")));
}

#[tokio::test]
async fn has_more_without_cursor_restarts_from_default() {
    let source = ScriptedSource::new(vec![
        Ok(ListResponse::continued(vec![json!(1)], None)),
        Ok(ListResponse::terminal(vec![json!(2)])),
    ]);
    let src = &source;

    let drained = drain(move |p| src.fetch(p), SearchParameters::default())
        .await
        .unwrap();

    assert_eq!(drained.results, vec![json!(1), json!(2)]);
    assert_eq!(source.cursors(), vec![None, None]);
}

#[tokio::test]
async fn concurrent_drains_are_independent() {
    let left = ScriptedSource::new(vec![
        Ok(ListResponse::continued(vec![json!("l1")], Some("l".into()))),
        Ok(ListResponse::continued(vec![json!("l2")], Some("ll".into()))),
        Ok(ListResponse::terminal(vec![json!("l3")])),
    ]);
    let right = ScriptedSource::new(vec![
        Ok(ListResponse::continued(vec![json!("r1")], Some("r".into()))),
        Ok(ListResponse::terminal(vec![json!("r2")]).with_metadata("type", json!("user"))),
    ]);
    let (l, r) = (&left, &right);

    let (left_result, right_result) = futures::future::join(
        drain(move |p| l.fetch(p), SearchParameters::default()),
        drain(move |p| r.fetch(p), SearchParameters::default()),
    )
    .await;

    let left_result = left_result.unwrap();
    let right_result = right_result.unwrap();
    assert_eq!(left_result.results, vec![json!("l1"), json!("l2"), json!("l3")]);
    assert_eq!(left_result.list_type(), None);
    assert_eq!(right_result.results, vec![json!("r1"), json!("r2")]);
    assert_eq!(right_result.list_type(), Some("user"));
}

#[tokio::test]
async fn cancelled_drain_issues_no_further_requests() {
    let calls = AtomicUsize::new(0);
    let calls_ref = &calls;

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        drain(
            move |_: SearchParameters| {
                let n = calls_ref.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n == 2 {
                        futures::future::pending::<()>().await;
                    }
                    Ok::<_, AppError>(ListResponse::continued(
                        vec![json!(n)],
                        Some(format!("c{}", n)),
                    ))
                }
            },
            SearchParameters::default(),
        ),
    )
    .await;

    assert!(outcome.is_err(), "drain should have timed out");
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
