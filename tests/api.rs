// Integration tests for the HTTP surface: message list, message creation,
// validation failures, and the served pages.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use parley::messages::model;
use parley::AppState;
use serde_json::{json, Value};

fn test_server(state: &AppState) -> TestServer {
    TestServer::new(parley::app(state.clone())).expect("test server")
}

#[tokio::test]
async fn posting_a_valid_message_returns_the_created_row() {
    let state = common::memory_state().await;
    let server = test_server(&state);

    let response = server
        .post("/messages")
        .json(&json!({ "message": { "content": "hello there", "username": "ferris" } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["id"].as_i64().expect("id") > 0);
    assert_eq!(body["content"], "hello there");
    assert_eq!(body["username"], "ferris");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn posting_without_content_is_rejected_and_persists_nothing() {
    let state = common::memory_state().await;
    let server = test_server(&state);

    let response = server
        .post("/messages")
        .json(&json!({ "message": { "username": "ferris" } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["errors"], json!(["Content can't be blank"]));

    let listed: Value = server.get("/messages").await.json();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn posting_blank_fields_reports_every_error() {
    let state = common::memory_state().await;
    let server = test_server(&state);

    let response = server
        .post("/messages")
        .json(&json!({ "message": { "content": "   ", "username": "" } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body["errors"],
        json!(["Content can't be blank", "Username can't be blank"])
    );
}

#[tokio::test]
async fn index_returns_messages_in_creation_order() {
    let state = common::memory_state().await;
    let server = test_server(&state);

    for content in ["first", "second", "third"] {
        let response = server
            .post("/messages")
            .json(&json!({ "message": { "content": content, "username": "ferris" } }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let listed: Vec<Value> = server.get("/messages").await.json();
    assert_eq!(listed.len(), 3);
    let contents: Vec<&str> = listed
        .iter()
        .map(|m| m["content"].as_str().expect("content"))
        .collect();
    assert_eq!(contents, ["first", "second", "third"]);

    let ids: Vec<i64> = listed
        .iter()
        .map(|m| m["id"].as_i64().expect("id"))
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn index_caps_at_the_most_recent_hundred() {
    let state = common::memory_state().await;
    let server = test_server(&state);

    for i in 1..=105 {
        model::insert(&state.db_pool, &format!("msg {i}"), "ferris")
            .await
            .expect("insert");
    }

    let listed: Vec<Value> = server.get("/messages").await.json();
    assert_eq!(listed.len(), 100);
    // The five oldest rows fall off; order stays ascending.
    assert_eq!(listed[0]["content"], "msg 6");
    assert_eq!(listed[99]["content"], "msg 105");
}

#[tokio::test]
async fn pages_and_health_endpoint_are_served() {
    let state = common::memory_state().await;
    let server = test_server(&state);

    let username_page = server.get("/").await;
    assert_eq!(username_page.status_code(), StatusCode::OK);
    assert!(username_page.text().contains("Enter your name to start chatting"));

    let chat_page = server.get("/chat").await;
    assert_eq!(chat_page.status_code(), StatusCode::OK);
    assert!(chat_page.text().contains("Type your message..."));

    assert_eq!(server.get("/up").await.status_code(), StatusCode::OK);
}
