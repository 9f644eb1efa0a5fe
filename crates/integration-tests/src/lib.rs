//! Integration test support for the shopping list API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no database needed)
//! cargo test -p shopping-list-integration-tests
//!
//! # Live tests against a running server
//! SHOPPING_LIST_BASE_URL=http://localhost:3000 \
//!     cargo test -p shopping-list-integration-tests -- --ignored
//! ```
//!
//! [`TestApp`] drives the real router in-process over an
//! [`InMemoryListStore`], so every layer except Sentry is exercised.

#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use shopping_list_api::config::DEFAULT_MOCK_USER_ID;
use shopping_list_api::db::InMemoryListStore;
use shopping_list_api::middleware::{MockIdentityProvider, PROFILE_HEADER};
use shopping_list_api::routes::PATH_PREFIX;
use shopping_list_api::{AppState, app};

/// Identity every request is attributed to.
pub const CALLER_ID: &str = DEFAULT_MOCK_USER_ID;

/// Absolute URI of a list route.
#[must_use]
pub fn list_uri(path: &str) -> String {
    format!("{PATH_PREFIX}{path}")
}

/// A response with its body decoded.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, or `Value::Null` if the body is not JSON.
    pub json: Value,
    pub text: String,
}

impl TestResponse {
    /// `errorCode` of an error envelope.
    #[must_use]
    pub fn error_code(&self) -> &str {
        self.json["errorCode"].as_str().unwrap_or_default()
    }
}

/// Router plus the store behind it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryListStore>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryListStore::new());
        let state = AppState::new(
            store.clone(),
            Arc::new(MockIdentityProvider::new(CALLER_ID)),
        );
        Self {
            router: app(state),
            store,
        }
    }

    /// Send one request to an absolute `uri`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        profile: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(profile) = profile {
            builder = builder.header(PROFILE_HEADER, profile);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            json,
            text,
        }
    }

    /// GET a list route; `path` is relative to the list routes and may carry a query.
    pub async fn get(&self, path: &str, profile: &str) -> TestResponse {
        self.send(Method::GET, &list_uri(path), Some(profile), None)
            .await
    }

    /// POST a JSON body to a list route.
    pub async fn post(&self, path: &str, profile: &str, body: Value) -> TestResponse {
        self.send(Method::POST, &list_uri(path), Some(profile), Some(body))
            .await
    }

    /// DELETE a list route with a JSON body.
    pub async fn delete(&self, path: &str, profile: &str, body: Value) -> TestResponse {
        self.send(Method::DELETE, &list_uri(path), Some(profile), Some(body))
            .await
    }

    /// Create a list as the caller and return its id.
    pub async fn create_list(&self, title: &str) -> String {
        let resp = self
            .post("/create", "owner", serde_json::json!({ "title": title }))
            .await;
        assert_eq!(resp.status, StatusCode::OK, "create failed: {}", resp.text);
        resp.json["id"]
            .as_str()
            .expect("created list has an id")
            .to_string()
    }
}
