use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::auth::{JwtTokenService, TokenService};
use crate::chatbot::{Chatbot, KeywordChatbot};
use crate::config::AppConfig;
use crate::database::{DocumentStore, MemoryStore, MongoStore};
use crate::news::{NewsApiClient, NewsSource};

/// Server context handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub tokens: Arc<dyn TokenService>,
    pub news: Arc<dyn NewsSource>,
    pub chatbot: Arc<dyn Chatbot>,
}

impl AppState {
    /// Wire the production collaborators described by `config`
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match &config.database.mongo_uri {
            Some(uri) => Arc::new(
                MongoStore::connect(uri, &config.database.database_name)
                    .await
                    .context("failed to connect to MongoDB")?,
            ),
            None => {
                warn!("MONGO_URI not set, using in-memory document store (data is lost on restart)");
                Arc::new(MemoryStore::new())
            }
        };

        let tokens = JwtTokenService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)
            .context("JWT_SECRET must be set")?;
        let news = NewsApiClient::new(&config.news).context("failed to build news API client")?;

        info!(
            "Server context ready (environment: {:?}, database: {})",
            config.environment, config.database.database_name
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens: Arc::new(tokens),
            news: Arc::new(news),
            chatbot: Arc::new(KeywordChatbot::new()),
        })
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_news(mut self, news: Arc<dyn NewsSource>) -> Self {
        self.news = news;
        self
    }

    pub fn with_chatbot(mut self, chatbot: Arc<dyn Chatbot>) -> Self {
        self.chatbot = chatbot;
        self
    }
}
