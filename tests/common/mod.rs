#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use fitness_api::config::AppConfig;
use fitness_api::database::DocumentStore;
use fitness_api::news::{NewsError, NewsSource, UpstreamReply};
use fitness_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// News source that always answers with a fixed status and body
pub struct StubNews {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
impl NewsSource for StubNews {
    async fn top_headlines(&self) -> Result<UpstreamReply, NewsError> {
        Ok(UpstreamReply {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.server.enable_request_logging = false;
    config.database.mongo_uri = None;
    config.news.api_key = "fake_api_key".to_string();
    config
}

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub allow: Option<String>,
    pub body: Value,
}

impl TestApp {
    /// In-memory store, stub news returning no articles
    pub async fn new() -> Result<Self> {
        let state = AppState::from_config(test_config()).await?;
        Ok(Self::with_state(state.with_news(Arc::new(StubNews {
            status: 200,
            body: json!({ "articles": [] }),
        }))))
    }

    pub fn with_state(state: AppState) -> Self {
        let router = app(state.clone());
        Self { state, router }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.state.store.as_ref()
    }

    pub fn token_for(&self, email: &str) -> String {
        self.state.tokens.issue(email).expect("issue token")
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let allow = response
            .headers()
            .get(header::ALLOW)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(TestResponse { status, allow, body })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}
