//! HTTP boundary tests driven through the router

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{film_page, list_page, malformed_item, nested_item, scraper_config, FILM_PATH, LIST_PATH};
use movie_picker::server::{create_router, AppState};
use movie_picker::MoviePicker;

fn router(origin: &str) -> Router {
    let picker = MoviePicker::from_config(&scraper_config(origin)).unwrap();
    create_router(AppState::new(picker))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, cache_control, body)
}

fn encode(url: &str) -> String {
    url::form_urlencoded::byte_serialize(url.as_bytes()).collect()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, _, body) = get(router("http://127.0.0.1:9"), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_url_is_bad_request() {
    let (status, _, body) = get(router("http://127.0.0.1:9"), "/api/letterboxd").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "URL parameter is required" }));
}

#[tokio::test]
async fn non_list_url_is_rejected_without_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uri = format!(
        "/api/letterboxd?url={}",
        encode(&format!("{}/letterboxd.com/user/films/", server.uri()))
    );
    let (status, _, body) = get(router(&server.uri()), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Letterboxd list URL. Must be a list page.");
}

#[tokio::test]
async fn list_returns_movies_and_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(
            &[
                nested_item("Dune (2021)", "/film/dune-2021/", "1"),
                malformed_item("Ad"),
                nested_item("Alien (1979)", "/film/alien/", "2"),
            ],
            None,
        )))
        .mount(&server)
        .await;

    let uri = format!("/api/letterboxd?url={}", encode(&format!("{}{LIST_PATH}", server.uri())));
    let (status, cache_control, body) = get(router(&server.uri()), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("no-store"));
    assert_eq!(body["total"], 2);
    assert_eq!(body["movies"][0]["title"], "Dune");
    assert_eq!(body["movies"][0]["year"], "2021");
    assert_eq!(body["movies"][1]["id"], "2");
}

#[tokio::test]
async fn empty_list_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&[], None)))
        .mount(&server)
        .await;

    let uri = format!("/api/letterboxd?url={}", encode(&format!("{}{LIST_PATH}", server.uri())));
    let (status, _, body) = get(router(&server.uri()), &uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "No movies found. The list might be private or the scraping logic needs update."
    );
}

#[tokio::test]
async fn upstream_failure_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let uri = format!("/api/letterboxd?url={}", encode(&format!("{}{LIST_PATH}", server.uri())));
    let (status, _, body) = get(router(&server.uri()), &uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}

#[tokio::test]
async fn film_poster_is_cacheable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(film_page(Some("https://a.ltrbxd.com/dune.jpg"))))
        .mount(&server)
        .await;

    let uri = format!("/api/letterboxd/film?url={}", encode(&format!("{}{FILM_PATH}", server.uri())));
    let (status, cache_control, body) = get(router(&server.uri()), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("public, max-age=3600"));
    assert_eq!(body, json!({ "poster": "https://a.ltrbxd.com/dune.jpg" }));
}

#[tokio::test]
async fn film_without_poster_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(film_page(None)))
        .mount(&server)
        .await;

    let uri = format!("/api/letterboxd/film?url={}", encode(&format!("{}{FILM_PATH}", server.uri())));
    let (status, _, body) = get(router(&server.uri()), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "poster": null }));
}

#[tokio::test]
async fn invalid_film_url_is_bad_request() {
    let uri = format!("/api/letterboxd/film?url={}", encode("https://letterboxd.com/user/list/x/"));
    let (status, _, body) = get(router("http://127.0.0.1:9"), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Film URL");
}
