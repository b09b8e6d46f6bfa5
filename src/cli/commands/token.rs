use anyhow::Context;
use serde_json::{Map, Value};

use crate::auth::{JwtTokenService, TokenService};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;

pub fn handle(config: AppConfig, email: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let tokens = JwtTokenService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)
        .context("JWT_SECRET must be set")?;
    let token = tokens.issue(email)?;

    let mut data = Map::new();
    data.insert("email".to_string(), Value::String(email.to_string()));
    data.insert("access_token".to_string(), Value::String(token));
    data.insert("expires_in_hours".to_string(), Value::from(config.security.jwt_expiry_hours));

    output_success(output_format, "Token issued", data)
}
