use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::NewsConfig;

/// Articles whose title starts with this marker were redacted upstream
pub const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("News API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What the upstream answered: its status code and (best-effort) JSON body
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

/// A source of top-headline articles
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn top_headlines(&self) -> Result<UpstreamReply, NewsError>;
}

/// newsapi.org-compatible client. Single attempt per call, no caching.
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    category: String,
}

impl NewsApiClient {
    pub fn new(config: &NewsConfig) -> Result<Self, NewsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.api_key.is_empty() {
            tracing::warn!("NEWS_API_KEY is not set; /resources will be rejected upstream");
        }

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            category: config.category.clone(),
        })
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn top_headlines(&self) -> Result<UpstreamReply, NewsError> {
        let url = format!("{}/top-headlines", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("category", self.category.as_str()),
                ("language", "en"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        // A 200 body that cannot be read or decoded is a transport fault.
        // Non-200 bodies are never used.
        let body = if status == 200 {
            response.json::<Value>().await?
        } else {
            Value::Null
        };

        Ok(UpstreamReply { status, body })
    }
}

/// Articles from an upstream body, minus the redacted ones
pub fn visible_articles(body: &Value) -> Vec<Value> {
    body.get("articles")
        .and_then(Value::as_array)
        .map(|articles| {
            articles
                .iter()
                .filter(|article| !is_removed(article))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

fn is_removed(article: &Value) -> bool {
    article
        .get("title")
        .and_then(Value::as_str)
        .is_some_and(|title| title.starts_with(REMOVED_MARKER))
}
