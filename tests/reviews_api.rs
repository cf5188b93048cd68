//! Review endpoint behaviour, driven in-process against the in-memory backends.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::TestApp;

async fn add(app: &TestApp, token: &str, movie_id: &str, reviewer_id: &str) -> (StatusCode, Value) {
    // ---
    app.post(
        "/reviews/addreview",
        token,
        json!({ "movie_id": movie_id, "reviewer_id": reviewer_id, "review": "Loved it" }),
    )
    .await
}

#[tokio::test]
async fn user_can_add_review() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    let (status, body) = add(&app, &user, "m123", "r1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["movie_id"], "m123");
    assert!(body["data"]["id"].as_str().is_some());
}

#[tokio::test]
async fn admin_cannot_add_review() {
    // ---
    let app = TestApp::new();
    let admin = app.admin().await;

    let (status, body) = add(&app, &admin, "m1", "r1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "error");
}

#[tokio::test]
async fn missing_review_text_fails_validation() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    let (status, body) = app
        .post(
            "/reviews/addreview",
            &user,
            json!({ "movie_id": "m1", "reviewer_id": "r1" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["fields"]["review"][0], "required");
}

#[tokio::test]
async fn movie_query_matches_substring() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    add(&app, &user, "m123", "r1").await;
    add(&app, &user, "z999", "r2").await;

    let (status, body) = app.get("/reviews/movie?movie_id=m1", &user).await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["movie_id"], "m123");

    let (status, body) = app.get("/reviews/movie?movie_id=nothing", &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn reviewer_query_matches_substring() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    add(&app, &user, "m1", "gandalf").await;
    add(&app, &user, "m2", "gandalf").await;
    add(&app, &user, "m3", "frodo").await;

    let (status, body) = app.get("/reviews/reviewer?reviewer_id=dalf", &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_query_parameter_is_client_error() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    for uri in [
        "/reviews/movie",
        "/reviews/movie?movie_id=",
        "/reviews/reviewer",
    ] {
        let (status, body) = app.get(uri, &user).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["data"]["error"], "Invalid Search Index");
    }
}

#[tokio::test]
async fn delete_review_then_not_found() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    let (_, body) = add(&app, &user, "m1", "r1").await;
    let uri = format!("/reviews/{}", body["data"]["id"].as_str().unwrap());

    let (status, body) = app.delete(&uri, &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"], "Your review was successfully deleted!");

    let (status, body) = app.delete(&uri, &user).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "Review with specified ID not found!");
}

#[tokio::test]
async fn delete_with_unparseable_id_is_not_found() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    let (status, _) = app.delete("/reviews/not-a-uuid", &user).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .delete(&format!("/reviews/{}", uuid::Uuid::new_v4()), &user)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
