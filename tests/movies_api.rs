//! Movie endpoint behaviour, driven in-process against the in-memory backends.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::TestApp;

fn movie_body(name: &str) -> Value {
    // ---
    json!({
        "name": name,
        "topic": "Space horror",
        "genre_id": "g1",
        "movie_url": "https://example.com/watch"
    })
}

#[tokio::test]
async fn movies_crud_operations() {
    // ---
    let app = TestApp::new();
    let admin = app.admin().await;

    let (status, _) = app.get("/movies/unknown", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.post("/movies/createmovie", &admin, movie_body("Alien")).await;
    assert_eq!(status, StatusCode::CREATED);
    let movie_id = body["data"]["movie_id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["name"], "Alien");

    let uri = format!("/movies/{movie_id}");
    let (status, body) = app.get(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["topic"], "Space horror");

    let (status, body) = app
        .put(
            &format!("/movies/editmovie/{movie_id}"),
            &admin,
            movie_body("Alien: Director's Cut"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alien: Director's Cut");

    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movie_mutations_require_admin() {
    // ---
    let app = TestApp::new();
    let user = app.user().await;

    let (status, _) = app.post("/movies/createmovie", &user, movie_body("Heat")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete("/movies/anything", &user).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_movie_is_rejected() {
    // ---
    let app = TestApp::new();
    let admin = app.admin().await;

    let (status, body) = app
        .post("/movies/createmovie", &admin, json!({ "name": "X", "topic": "t" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["fields"]["name"][0], "length");
    assert_eq!(body["data"]["fields"]["movie_url"][0], "required");
}

#[tokio::test]
async fn listing_and_search() {
    // ---
    let app = TestApp::new();
    let admin = app.admin().await;

    for name in ["Alien", "Aliens", "Heat"] {
        app.post("/movies/createmovie", &admin, movie_body(name)).await;
    }

    let (status, body) = app.get("/movies/getmovies?recordPerPage=2", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_count"], 3);
    assert_eq!(body["data"]["movie_items"].as_array().unwrap().len(), 2);

    let (status, body) = app.get("/movies/search?name=Alien", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = app.get("/movies/search", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
