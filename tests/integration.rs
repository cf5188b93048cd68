use anyhow::{ensure, Result};
use serde_json::{json, Value};

mod common;

use common::TestServer;
use movie_catalog::{create_session, ROLE_ADMIN};

#[tokio::test]
async fn health_endpoint_works() {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to read response body");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn full_health_check_pings_backends() {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/health?mode=full"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn root_endpoint_works() {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body = response.text().await.expect("Failed to read response body");
    assert!(body.contains("/genres/creategenre"));
}

#[tokio::test]
async fn invalid_routes_return_404() {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/nonexistent"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn resource_routes_require_a_session() {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/genres/getgenres"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "error");
    assert_eq!(body["data"]["error"], "No Authorization header provided");

    let response = server
        .client
        .get(server.url("/genres/getgenres"))
        .bearer_auth("not-a-session")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn server_handles_concurrent_requests() {
    // ---
    let server = TestServer::new().await;

    // Make multiple concurrent requests
    let futures = (0..10).map(|_| server.client.get(server.url("/health")).send());

    let responses = futures::future::join_all(futures).await;

    // All requests should succeed
    for response in responses {
        let response = response.expect("Request should succeed");
        assert_eq!(response.status(), 200);
    }
}

#[tokio::test]
async fn server_handles_malformed_json() -> Result<()> {
    // ---
    let server = TestServer::new().await;
    let token = create_session(server.state.sessions().as_ref(), "a1", "admin", ROLE_ADMIN).await?;

    let response = server
        .client
        .post(server.url("/genres/creategenre"))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{ invalid json }")
        .send()
        .await
        .expect("Failed to send request");

    // Should return 400 Bad Request inside the error envelope
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    ensure!(body["status"] == 400);
    ensure!(body["message"] == "error");
    Ok(())
}

#[tokio::test]
async fn genre_scenario_over_the_wire() -> Result<()> {
    // ---
    let server = TestServer::new().await;
    let token = create_session(server.state.sessions().as_ref(), "u1", "admin", ROLE_ADMIN).await?;

    let response = server
        .client
        .post(server.url("/genres/creategenre"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Action", "creator_id": "u1" }))
        .send()
        .await?;
    assert_eq!(response.status(), 201);

    let created: Value = response.json().await?;
    let genre_id = created["data"]["genre_id"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("No genre_id in response"))?
        .to_string();

    let response = server
        .client
        .post(server.url("/genres/creategenre"))
        .bearer_auth(&token)
        .json(&json!({ "name": "action", "creator_id": "u2" }))
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let rejected: Value = response.json().await?;
    assert_eq!(rejected["data"]["count"], 1);

    let response = server
        .client
        .get(server.url("/genres/getgenres?recordPerPage=10&page=1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let listing: Value = response.json().await?;
    assert_eq!(listing["data"]["total_count"], 1);
    assert_eq!(listing["data"]["genre_items"][0]["genre_id"], genre_id.as_str());

    Ok(())
}
