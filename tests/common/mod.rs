// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use movie_catalog::{
    build_router, create_memory_repository, create_memory_sessions, create_noop_metrics,
    create_session, AppState,
};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower::ServiceExt;

// ============================================================================
// Test Setup
// ============================================================================

/// Application state backed entirely by in-memory stores.
pub fn memory_state() -> AppState {
    // ---
    AppState::new(
        Arc::new(create_memory_repository()),
        Arc::new(create_memory_sessions()),
        create_noop_metrics().expect("noop metrics"),
        Duration::from_secs(10),
    )
}

/// Router plus state, driven in-process through `tower::ServiceExt::oneshot`.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    // ---
    pub fn new() -> Self {
        // ---
        let state = memory_state();
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Issues a session token for a caller holding `role`.
    pub async fn token(&self, user_id: &str, role: &str) -> String {
        // ---
        create_session(self.state.sessions().as_ref(), user_id, user_id, role)
            .await
            .expect("Failed to create session")
    }

    pub async fn admin(&self) -> String {
        // ---
        self.token("admin-1", "ADMIN").await
    }

    pub async fn user(&self) -> String {
        // ---
        self.token("user-1", "USER").await
    }

    /// Sends a raw body and returns the status with the parsed JSON body
    /// (`Value::Null` when the body is empty or not JSON).
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Body,
    ) -> (StatusCode, Value) {
        // ---
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = builder.body(body).expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router should not fail");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        // ---
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        self.send_raw(method, uri, token, body).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        // ---
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        // ---
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        // ---
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        // ---
        self.send(Method::DELETE, uri, Some(token), None).await
    }
}

/// A real listener on an ephemeral port, for tests that go over the wire.
pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
    pub state: AppState,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // --
        Self::with_state(memory_state()).await
    }

    pub async fn with_state(state: AppState) -> Self {
        // ---
        let app = build_router(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            addr,
            client,
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
