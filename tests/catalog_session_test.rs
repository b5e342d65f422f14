mod support;

use crate::support::tracing_init;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use release_matcher::catalog::{CatalogError, CatalogSearch, CatalogSession, SearchQuery};
use serde_json::{json, Value};
use std::collections::HashMap;

const API_KEY: &str = "secret";

fn success(response: Value) -> Response {
    Json(json!({"status": "success", "response": response})).into_response()
}

fn browse_page(group_id: u64, pages: u32) -> Response {
    success(json!({
        "pages": pages,
        "results": [{
            "groupId": group_id,
            "groupName": format!("Group {}", group_id),
            "torrents": [{"torrentId": group_id * 10}]
        }]
    }))
}

/// Stand-in for the catalog's `ajax.php`, keyed on `searchstr`
async fn ajax(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if headers.get("Authorization").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return Json(json!({"status": "failure", "error": "bad credentials"})).into_response();
    }

    let page: u64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    match params.get("action").map(String::as_str) {
        Some("torrent") => success(json!({
            "group": {"name": "Kind of Blue"},
            "torrent": {
                "id": params.get("id").and_then(|id| id.parse::<u64>().ok()).unwrap_or(0),
                "fileList": "01 So What.flac{{{12345000}}}",
                "filePath": "Miles Davis - Kind of Blue"
            }
        })),
        Some("browse") => match params.get("searchstr").map(String::as_str) {
            Some("two pages") => browse_page(page, 2),
            Some("flaky") if page == 1 => browse_page(1, 3),
            Some("flaky") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            Some("endless") => browse_page(page, 50),
            Some("rejected") => {
                Json(json!({"status": "failure", "error": "bad parameters"})).into_response()
            }
            _ => browse_page(page, 1),
        },
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn spawn_catalog() -> String {
    let app = Router::new().route("/ajax.php", get(ajax));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn search(text: &str) -> SearchQuery {
    SearchQuery {
        search_str: Some(text.to_string()),
        ..Default::default()
    }
}

fn group_ids(results: &[release_matcher::catalog::SearchResult]) -> Vec<u64> {
    results.iter().map(|r| r.group_id).collect()
}

#[tokio::test]
async fn test_browse_joins_all_pages() {
    tracing_init();
    let session = CatalogSession::new(spawn_catalog().await, API_KEY);

    let results = session.browse(&search("two pages")).await.unwrap();

    assert_eq!(group_ids(&results), vec![1, 2]);
    assert_eq!(results[1].torrents[0].torrent_id, 20);
}

#[tokio::test]
async fn test_browse_keeps_pages_fetched_before_a_failure() {
    tracing_init();
    let session = CatalogSession::new(spawn_catalog().await, API_KEY);

    let results = session.browse(&search("flaky")).await.unwrap();

    assert_eq!(group_ids(&results), vec![1]);
}

#[tokio::test]
async fn test_browse_stops_at_max_pages() {
    tracing_init();
    let session = CatalogSession::new(spawn_catalog().await, API_KEY).with_max_pages(3);

    let results = session.browse(&search("endless")).await.unwrap();

    assert_eq!(group_ids(&results), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_browse_failure_status() {
    tracing_init();
    let session = CatalogSession::new(spawn_catalog().await, API_KEY);

    match session.browse(&search("rejected")).await {
        Err(CatalogError::SearchStatus { status, message }) => {
            assert_eq!(status, "failure");
            assert_eq!(message.as_deref(), Some("bad parameters"));
        }
        other => panic!("expected SearchStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_requests_carry_api_key() {
    tracing_init();
    let session = CatalogSession::new(spawn_catalog().await, "wrong");

    assert!(matches!(
        session.browse(&search("anything")).await,
        Err(CatalogError::SearchStatus { .. })
    ));
}

#[tokio::test]
async fn test_torrent_unwraps_response_torrent() {
    tracing_init();
    let session = CatalogSession::new(spawn_catalog().await, API_KEY);

    let details = session.torrent(42).await.unwrap();

    assert_eq!(details.id, 42);
    assert_eq!(details.file_list, "01 So What.flac{{{12345000}}}");
    assert_eq!(details.file_path, "Miles Davis - Kind of Blue");
}
