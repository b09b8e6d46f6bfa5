use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub news: NewsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// When unset the server falls back to the in-memory store
    #[serde(skip_serializing)]
    pub mongo_uri: Option<String>,
    pub database_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    pub category: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a variable lookup; `from_env` passes the process environment
    pub fn with_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = var("FITNESS_API_PORT")
            .or_else(|| var("PORT"))
            .and_then(|s| s.parse().ok())
        {
            self.server.port = port;
        }
        if let Some(v) = var("API_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Database overrides
        if let Some(v) = var("MONGO_URI") {
            if !v.trim().is_empty() {
                self.database.mongo_uri = Some(v);
            }
        }
        if let Some(v) = var("MONGO_DB") {
            self.database.database_name = v;
        }

        // Security overrides
        if let Some(v) = var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Some(v) = var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // News API overrides
        if let Some(v) = var("NEWS_API_KEY") {
            self.news.api_key = v;
        }
        if let Some(v) = var("NEWS_API_BASE_URL") {
            self.news.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = var("NEWS_API_CATEGORY") {
            self.news.category = v;
        }
        if let Some(v) = var("NEWS_API_TIMEOUT_SECS") {
            self.news.timeout_secs = v.parse().unwrap_or(self.news.timeout_secs);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                mongo_uri: None,
                database_name: "fitness".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: "development-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            news: NewsConfig {
                api_key: String::new(),
                base_url: "https://newsapi.org/v2".to_string(),
                category: "health".to_string(),
                timeout_secs: 10,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                mongo_uri: None,
                database_name: "fitness".to_string(),
            },
            security: SecurityConfig {
                // Must be provided through JWT_SECRET
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                enable_cors: true,
                cors_origins: vec![],
            },
            news: NewsConfig {
                api_key: String::new(),
                base_url: "https://newsapi.org/v2".to_string(),
                category: "health".to_string(),
                timeout_secs: 5,
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
