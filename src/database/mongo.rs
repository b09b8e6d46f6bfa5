use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document as BsonDocument};
use mongodb::options::UpdateOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use tracing::info;

use super::{Document, DocumentStore, StoreError, UpdateOutcome};

/// MongoDB-backed document store. The driver owns the connection pool.
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        info!("Connected to MongoDB database '{}'", database_name);
        Ok(Self {
            database: client.database(database_name),
        })
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.database.collection::<BsonDocument>(name)
    }
}

fn to_bson(document: Document) -> Result<BsonDocument, StoreError> {
    bson::to_document(&Value::Object(document)).map_err(|e| StoreError::Bson(e.to_string()))
}

fn from_bson(mut document: BsonDocument) -> Document {
    // ObjectIds go out as plain hex strings rather than {"$oid": ...}
    if let Some(Bson::ObjectId(oid)) = document.get("_id") {
        let hex = oid.to_hex();
        document.insert("_id", Bson::String(hex));
    }

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

fn bson_id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(to_bson(filter)?, None).await?;
        let documents: Vec<BsonDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(from_bson).collect())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        let found = self.collection(collection).find_one(to_bson(filter)?, None).await?;
        Ok(found.map(from_bson))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let result = self.collection(collection).insert_one(to_bson(document)?, None).await?;
        Ok(bson_id_to_string(&result.inserted_id))
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<Vec<String>, StoreError> {
        if documents.is_empty() {
            return Ok(vec![]);
        }

        let documents = documents.into_iter().map(to_bson).collect::<Result<Vec<_>, _>>()?;
        let result = self.collection(collection).insert_many(documents, None).await?;

        let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        ids.sort_by_key(|(index, _)| *index);
        Ok(ids.iter().map(|(_, id)| bson_id_to_string(id)).collect())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let options = UpdateOptions::builder().upsert(upsert).build();
        let result = self
            .collection(collection)
            .update_one(to_bson(filter)?, to_bson(update)?, options)
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
            upserted_id: result.upserted_id.as_ref().map(bson_id_to_string),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self.collection(collection).delete_one(to_bson(filter)?, None).await?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.database.run_command(bson::doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
