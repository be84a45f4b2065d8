//! Common test utilities for in-process API testing.
//!
//! Builds the real router around a [`MockTicketSource`] so handlers can be
//! exercised without a Freshdesk account.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use deskproxy_core::testing::MockTicketSource;
use deskproxy_core::{
    AggregatorSettings, Config, FreshdeskConfig, StatusTable, Ticket, TicketAggregator,
    TicketSource,
};
use deskproxy_server::api::create_router;
use deskproxy_server::state::AppState;

/// Re-export fixtures for test convenience
pub use deskproxy_core::testing::fixtures;

pub const TEST_DOMAIN: &str = "acme-test";
pub const TEST_API_KEY: &str = "test-key";

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, or the raw text as a JSON string when the body is not JSON.
    pub body: Value,
}

/// Test fixture wiring the router to a mock ticket source.
pub struct TestFixture {
    pub router: Router,
    pub source: Arc<MockTicketSource>,
}

impl TestFixture {
    /// Fixture whose upstream has no tickets.
    pub fn new() -> Self {
        Self::with_pages(Vec::new())
    }

    /// Fixture whose upstream serves `pages` in order.
    pub fn with_pages(pages: Vec<Vec<Ticket>>) -> Self {
        let source = Arc::new(MockTicketSource::with_pages(pages));
        let router = router_for(Arc::clone(&source) as Arc<dyn TicketSource>, test_config());
        Self { router, source }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        send(&self.router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }
}

/// Config pointing at the test domain with a fake API key.
pub fn test_config() -> Config {
    Config {
        freshdesk: FreshdeskConfig {
            api_key: TEST_API_KEY.to_string(),
            domain: TEST_DOMAIN.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build the application router around any ticket source.
pub fn router_for(source: Arc<dyn TicketSource>, config: Config) -> Router {
    let aggregator = TicketAggregator::new(
        source,
        StatusTable::freshdesk(),
        AggregatorSettings::from(&config.freshdesk),
    );
    let state = Arc::new(AppState::new(config, Arc::new(aggregator)));
    create_router(state)
}

/// Send a request through the router and collect the response.
pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    TestResponse {
        status,
        headers,
        body,
    }
}
