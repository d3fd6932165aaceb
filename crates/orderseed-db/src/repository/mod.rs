//! # Repository Module
//!
//! Typed access to the four seeded collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Seeder                                                                 │
//! │       │  db.customers().insert_all(&customers, chunk)                  │
//! │       ▼                                                                 │
//! │  Repository<Customer>                                                  │
//! │  ├── insert_all(&self, items, chunk_size)   serde → bson::Document     │
//! │  ├── load_snapshots(&self)                  projection → Snapshot      │
//! │  ├── find(&self, query)                     bson::Document → T         │
//! │  └── estimated_count(&self)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dyn DocumentStore                                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`Repository`] - generic over any [`Entity`]
//! - [`OrderRepository`] - orders plus index definitions and sample queries

pub mod order;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bson::oid::ObjectId;
use bson::{doc, Document};
use orderseed_core::{Customer, CustomerSnapshot, Order, Product, Store, StoreSnapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{DocumentStore, FindQuery};

pub use order::OrderRepository;

// =============================================================================
// Entity
// =============================================================================

/// A type stored in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Collection name.
    const COLLECTION: &'static str;

    /// The partial copy loaded back for embedding into orders.
    type Snapshot: DeserializeOwned + Send;

    /// Projection producing `Snapshot`, or `None` for the full document.
    fn snapshot_projection() -> Option<Document>;
}

impl Entity for Customer {
    const COLLECTION: &'static str = "customers";
    type Snapshot = CustomerSnapshot;

    fn snapshot_projection() -> Option<Document> {
        Some(doc! { "phones": 0 })
    }
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";
    type Snapshot = Product;

    fn snapshot_projection() -> Option<Document> {
        None
    }
}

impl Entity for Store {
    const COLLECTION: &'static str = "stores";
    type Snapshot = StoreSnapshot;

    fn snapshot_projection() -> Option<Document> {
        Some(doc! { "address": 0 })
    }
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";
    type Snapshot = Order;

    fn snapshot_projection() -> Option<Document> {
        None
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Typed operations on the collection of `T`.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("collection", &T::COLLECTION)
            .finish()
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Repository {
            store,
            _entity: PhantomData,
        }
    }

    /// Name of the backing collection.
    pub fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    pub async fn drop_collection(&self) -> DbResult<()> {
        self.store.drop_collection(T::COLLECTION).await
    }

    /// Inserts `items` in `insert_many` calls of at most `chunk_size` documents.
    ///
    /// Documents are serialized one chunk at a time. A `chunk_size` of 0 is
    /// treated as 1.
    pub async fn insert_all(&self, items: &[T], chunk_size: usize) -> DbResult<usize> {
        let mut written = 0;

        for chunk in items.chunks(chunk_size.max(1)) {
            let docs = chunk
                .iter()
                .map(bson::to_document)
                .collect::<Result<Vec<_>, _>>()?;

            written += self.store.insert_many(T::COLLECTION, docs).await?;
            debug!(collection = T::COLLECTION, written, "Inserted chunk");
        }

        Ok(written)
    }

    /// Loads every document through the snapshot projection.
    pub async fn load_snapshots(&self) -> DbResult<Vec<T::Snapshot>> {
        let mut query = FindQuery::all();
        query.projection = T::snapshot_projection();

        let docs = self.store.find(T::COLLECTION, query).await?;
        let snapshots = docs
            .into_iter()
            .map(bson::from_document)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(collection = T::COLLECTION, count = snapshots.len(), "Loaded snapshots");
        Ok(snapshots)
    }

    /// Runs `query` and deserializes every match.
    pub async fn find(&self, query: FindQuery) -> DbResult<Vec<T>> {
        let docs = self.store.find(T::COLLECTION, query).await?;
        Ok(docs
            .into_iter()
            .map(bson::from_document)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// `_id` values of the documents matching `query`.
    pub async fn find_ids(&self, query: FindQuery) -> DbResult<Vec<ObjectId>> {
        let docs = self.store.find(T::COLLECTION, query).await?;
        docs.iter()
            .map(|doc| {
                doc.get_object_id("_id")
                    .map_err(|e| DbError::Deserialization(e.to_string()))
            })
            .collect()
    }

    /// Document count from collection metadata.
    pub async fn estimated_count(&self) -> DbResult<u64> {
        self.store.estimated_document_count(T::COLLECTION).await
    }

    /// Exact document count.
    pub async fn count(&self) -> DbResult<u64> {
        self.store.count_documents(T::COLLECTION, Document::new()).await
    }

    /// Names of the indexes on the collection.
    pub async fn index_names(&self) -> DbResult<Vec<String>> {
        self.store.index_names(T::COLLECTION).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use orderseed_core::generator::{fake_customer, fake_store};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_insert_all_in_chunks() {
        let store = Arc::new(MemoryStore::new());
        let repo: Repository<Customer> = Repository::new(store);
        let mut rng = StdRng::seed_from_u64(1);
        let customers: Vec<Customer> = (0..25).map(|_| fake_customer(&mut rng)).collect();

        assert_eq!(repo.insert_all(&customers, 10).await.unwrap(), 25);
        assert_eq!(repo.estimated_count().await.unwrap(), 25);
        assert_eq!(repo.count().await.unwrap(), 25);
        assert_eq!(repo.insert_all(&[], 10).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_customer_snapshots_drop_phones() {
        let store = Arc::new(MemoryStore::new());
        let repo: Repository<Customer> = Repository::new(store.clone());
        let customer = fake_customer(&mut StdRng::seed_from_u64(2));
        repo.insert_all(std::slice::from_ref(&customer), 100).await.unwrap();

        let raw = store
            .find(
                "customers",
                FindQuery::all().projection(Customer::snapshot_projection().unwrap()),
            )
            .await
            .unwrap();
        assert!(raw[0].get("phones").is_none());

        let snapshots = repo.load_snapshots().await.unwrap();
        assert_eq!(snapshots, vec![customer.snapshot()]);
    }

    #[tokio::test]
    async fn test_store_snapshots_drop_address() {
        let repo: Repository<Store> = Repository::new(Arc::new(MemoryStore::new()));
        let store = fake_store(&mut StdRng::seed_from_u64(3));
        repo.insert_all(std::slice::from_ref(&store), 100).await.unwrap();

        assert_eq!(repo.load_snapshots().await.unwrap(), vec![store.snapshot()]);
        assert_eq!(repo.find(FindQuery::all()).await.unwrap(), vec![store]);
    }
}
