pub mod document;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A stored document: a JSON object keyed by field name
pub type Document = Map<String, Value>;

/// Logical collection names
pub mod collections {
    pub const USERS: &str = "users";
    pub const EVENTS: &str = "events";
    /// Enrollment records, one per (email, eventTitle)
    pub const ENROLLMENTS: &str = "user";
    pub const FOOD: &str = "food";
    pub const MEALS: &str = "meals";
}

/// Errors from a DocumentStore backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid update document: {0}")]
    InvalidUpdate(String),

    #[error("Duplicate _id in collection '{collection}': {id}")]
    DuplicateId { collection: String, id: String },

    #[error("BSON conversion error: {0}")]
    Bson(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Result of `update_one`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
    /// Set when the update inserted a new document
    pub upserted_id: Option<String>,
}

/// Collection-oriented document storage.
///
/// Filters are equality matches on (optionally dotted) field paths; an empty
/// filter matches every document. Updates use `$set` and `$push`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError>;

    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<Vec<String>, StoreError>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Unwrap a JSON object into a Document; anything else becomes empty
pub fn into_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Build a Document with `json!` syntax
#[macro_export]
macro_rules! document {
    ($($json:tt)+) => {
        $crate::database::into_document(::serde_json::json!($($json)+))
    };
}
