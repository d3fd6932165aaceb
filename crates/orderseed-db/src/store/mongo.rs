//! MongoDB-backed [`DocumentStore`].

use async_trait::async_trait;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Collection, IndexModel};
use tracing::debug;

use super::{DocumentStore, FindQuery};
use crate::error::{DbError, DbResult};

/// A handle on one MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: mongodb::Database,
}

impl MongoStore {
    pub fn new(database: mongodb::Database) -> Self {
        MongoStore { database }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn drop_collection(&self, collection: &str) -> DbResult<()> {
        debug!(collection, "Dropping collection");
        self.collection(collection).drop().await?;
        Ok(())
    }

    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> DbResult<usize> {
        if docs.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection(collection)
            .insert_many(docs)
            .await
            .map_err(|e| DbError::insert_failed(collection, e))?;

        Ok(result.inserted_ids.len())
    }

    async fn find(&self, collection: &str, query: FindQuery) -> DbResult<Vec<Document>> {
        let options = FindOptions::builder()
            .projection(query.projection)
            .sort(query.sort)
            .limit(query.limit)
            .build();

        let cursor = self
            .collection(collection)
            .find(query.filter)
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn estimated_document_count(&self, collection: &str) -> DbResult<u64> {
        Ok(self.collection(collection).estimated_document_count().await?)
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> DbResult<u64> {
        Ok(self.collection(collection).count_documents(filter).await?)
    }

    async fn create_index(&self, collection: &str, keys: Document) -> DbResult<String> {
        let model = IndexModel::builder().keys(keys).build();

        let result = self
            .collection(collection)
            .create_index(model)
            .await
            .map_err(|e| DbError::index_failed(collection, e))?;

        Ok(result.index_name)
    }

    async fn index_names(&self, collection: &str) -> DbResult<Vec<String>> {
        Ok(self.collection(collection).list_index_names().await?)
    }

    async fn ping(&self) -> DbResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
