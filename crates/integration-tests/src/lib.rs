//! Integration tests for Woodora.
//!
//! Tests drive the storefront router in-process with `tower::ServiceExt`,
//! against a fresh temporary data directory per test.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p woodora-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pricing` - Price list and quotes
//! - `storefront_catalog` - Listing search, facets and admin mutations
//! - `storefront_cart` - Session carts

#![allow(clippy::expect_used)]

use std::sync::Mutex;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use woodora_storefront::config::StorefrontConfig;
use woodora_storefront::state::AppState;

/// Largest response body the helpers will read.
const BODY_LIMIT: usize = 1024 * 1024;

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, or the raw text as a string value.
    pub body: Value,
}

/// A storefront instance with its own data directory and a cookie jar
/// holding one session.
pub struct TestContext {
    app: Router,
    data_dir: TempDir,
    cookie: Mutex<Option<String>>,
}

impl TestContext {
    /// Start a storefront on an empty data directory.
    #[must_use]
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");
        let state = AppState::new(StorefrontConfig::local(data_dir.path()));
        Self {
            app: woodora_storefront::app(state),
            data_dir,
            cookie: Mutex::new(None),
        }
    }

    /// The data directory backing this instance.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// Drop the session cookie, as a different shopper would.
    pub fn forget_session(&self) {
        *self.cookie.lock().expect("cookie jar poisoned") = None;
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Send a PATCH request with a JSON body.
    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = self.cookie.lock().expect("cookie jar poisoned").clone() {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let session_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next());
        if let Some(pair) = session_cookie {
            *self.cookie.lock().expect("cookie jar poisoned") = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
