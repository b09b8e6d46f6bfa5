use std::path::Path;

use anyhow::{anyhow, bail, Context};
use serde_json::{Map, Value};

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::{collections::EVENTS, Document};
use crate::state::AppState;

/// Parse a JSON array of event objects
pub fn parse_events(raw: &str) -> anyhow::Result<Vec<Document>> {
    let value: Value = serde_json::from_str(raw).context("events file is not valid JSON")?;
    let Value::Array(items) = value else {
        bail!("events file must contain a JSON array");
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(event) => Ok(event),
            _ => Err(anyhow!("event #{} is not a JSON object", index)),
        })
        .collect()
}

pub async fn handle(config: AppConfig, path: &Path, output_format: OutputFormat) -> anyhow::Result<()> {
    if config.database.mongo_uri.is_none() {
        bail!("MONGO_URI must be set to seed events (the in-memory store does not persist)");
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let events = parse_events(&raw)?;

    let state = AppState::from_config(config).await?;
    let ids = state.store.insert_many(EVENTS, events).await?;

    let mut data = Map::new();
    data.insert("inserted".to_string(), Value::from(ids.len()));
    output_success(output_format, "Events seeded", data)
}
