//! # Document Store
//!
//! The seam between the seeder and the database.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Repository<T> ──► dyn DocumentStore ──┬──► MongoStore  (mongodb crate) │
//! │                                        └──► MemoryStore (tests)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call names its collection. Documents cross the seam as
//! `bson::Document`; typed conversion happens in [`crate::repository`].

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use bson::{Bson, Document};

use crate::error::DbResult;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A `find` request: filter plus optional projection, sort and limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Document,
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

impl FindQuery {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(filter: Document) -> Self {
        FindQuery {
            filter,
            ..Self::default()
        }
    }

    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The collection operations the seeder needs.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Drops a collection. Dropping a missing collection is not an error.
    async fn drop_collection(&self, collection: &str) -> DbResult<()>;

    /// Inserts documents, returning how many were written.
    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> DbResult<usize>;

    async fn find(&self, collection: &str, query: FindQuery) -> DbResult<Vec<Document>>;

    /// Count from collection metadata, without scanning.
    async fn estimated_document_count(&self, collection: &str) -> DbResult<u64>;

    /// Exact count of the documents matching `filter`.
    async fn count_documents(&self, collection: &str, filter: Document) -> DbResult<u64>;

    /// Creates an index and returns its name.
    async fn create_index(&self, collection: &str, keys: Document) -> DbResult<String>;

    async fn index_names(&self, collection: &str) -> DbResult<Vec<String>>;

    /// Round-trips a no-op command.
    async fn ping(&self) -> DbResult<()>;
}

/// The server's default index name: `field_dir` pairs joined by `_`.
///
/// `{orderDate: -1, "customer.emails.email": 1}` → `orderDate_-1_customer.emails.email_1`
pub fn index_name(keys: &Document) -> String {
    keys.iter()
        .map(|(field, dir)| {
            let dir = match dir {
                Bson::Int32(v) => v.to_string(),
                Bson::Int64(v) => v.to_string(),
                Bson::Double(v) => (*v as i64).to_string(),
                Bson::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{field}_{dir}")
        })
        .collect::<Vec<_>>()
        .join("_")
}
