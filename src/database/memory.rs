use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::document::{apply_update, id_to_string, matches, upsert_seed};
use super::{Document, DocumentStore, StoreError, UpdateOutcome};

/// In-process document store used for tests and local development
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(document: &mut Document) -> String {
        match document.get("_id") {
            Some(id) => id_to_string(id),
            None => {
                let id = Uuid::new_v4().simple().to_string();
                document.insert("_id".to_string(), Value::String(id.clone()));
                id
            }
        }
    }

    fn push_unique(
        collection: &str,
        documents: &mut Vec<Document>,
        mut document: Document,
    ) -> Result<String, StoreError> {
        let id = Self::assign_id(&mut document);
        if documents.iter().any(|d| d.get("_id") == document.get("_id")) {
            return Err(StoreError::DuplicateId { collection: collection.to_string(), id });
        }
        documents.push(document);
        Ok(id)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        Self::push_unique(collection, documents, document)
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<Vec<String>, StoreError> {
        let mut collections = self.collections.write().await;
        let existing = collections.entry(collection.to_string()).or_default();
        documents
            .into_iter()
            .map(|document| Self::push_unique(collection, existing, document))
            .collect()
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        if let Some(document) = documents.iter_mut().find(|d| matches(d, &filter)) {
            // Stored document is only replaced once every operator has applied
            let mut updated = document.clone();
            apply_update(&mut updated, &update)?;
            let modified = u64::from(updated != *document);
            *document = updated;
            return Ok(UpdateOutcome {
                matched: 1,
                modified,
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome::default());
        }

        let mut document = upsert_seed(&filter)?;
        apply_update(&mut document, &update)?;
        let id = Self::push_unique(collection, documents, document)?;

        Ok(UpdateOutcome {
            matched: 0,
            modified: 0,
            upserted_id: Some(id),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match documents.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
