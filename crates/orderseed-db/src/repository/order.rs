//! # Order Repository
//!
//! Orders plus the two compound indexes and the three sample reads.
//!
//! ## Index ↔ Query Pairing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Index 1  orderStatus ↑ shippingStatus ↑ details.product.name ↑        │
//! │           deliveryDate ↓                                               │
//! │           └─► delivered_orders_for_products (equality, $in, sort)      │
//! │                                                                         │
//! │  Index 2  customer.emails.email ↑ orderDate ↓                          │
//! │           └─► last_orders_by_email (equality, sort)                    │
//! │                                                                         │
//! │  (none)   estimated_count reads collection metadata                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use bson::{doc, Document};
use orderseed_core::{Order, OrderStatus, ShippingStatus};
use tracing::{debug, info};

use super::{Entity, Repository};
use crate::error::DbResult;
use crate::store::{DocumentStore, FindQuery};

/// Key specs of the indexes created on `orders`.
pub fn order_indexes() -> [Document; 2] {
    [
        doc! {
            "orderStatus": 1,
            "shippingStatus": 1,
            "details.product.name": 1,
            "deliveryDate": -1,
        },
        doc! {
            "customer.emails.email": 1,
            "orderDate": -1,
        },
    ]
}

/// Repository for the `orders` collection.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    orders: Repository<Order>,
    store: Arc<dyn DocumentStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        OrderRepository {
            orders: Repository::new(store.clone()),
            store,
        }
    }

    pub async fn drop_collection(&self) -> DbResult<()> {
        self.orders.drop_collection().await
    }

    pub async fn insert_all(&self, orders: &[Order], chunk_size: usize) -> DbResult<usize> {
        self.orders.insert_all(orders, chunk_size).await
    }

    pub async fn find(&self, query: FindQuery) -> DbResult<Vec<Order>> {
        self.orders.find(query).await
    }

    /// Up to `limit` orders in natural order.
    pub async fn sample(&self, limit: i64) -> DbResult<Vec<Order>> {
        self.orders.find(FindQuery::all().limit(limit)).await
    }

    /// Creates both compound indexes, returning their names.
    pub async fn create_indexes(&self) -> DbResult<Vec<String>> {
        let mut names = Vec::with_capacity(2);
        for keys in order_indexes() {
            let name = self.store.create_index(Order::COLLECTION, keys).await?;
            debug!(index = %name, "Created index");
            names.push(name);
        }
        info!(count = names.len(), "Indexes created");
        Ok(names)
    }

    pub async fn index_names(&self) -> DbResult<Vec<String>> {
        self.orders.index_names().await
    }

    /// Most recent orders placed by the customer owning `email`.
    pub async fn last_orders_by_email(&self, email: &str, limit: i64) -> DbResult<Vec<Order>> {
        let query = FindQuery::filter(doc! { "customer.emails.email": email })
            .sort(doc! { "orderDate": -1 })
            .limit(limit);
        self.orders.find(query).await
    }

    /// Most recently delivered, shipped orders containing any of `product_names`.
    pub async fn delivered_orders_for_products(
        &self,
        product_names: &[String],
        limit: i64,
    ) -> DbResult<Vec<Order>> {
        let query = FindQuery::filter(doc! {
            "orderStatus": OrderStatus::Shipped.as_str(),
            "shippingStatus": ShippingStatus::Delivered.as_str(),
            "details.product.name": { "$in": product_names.to_vec() },
        })
        .sort(doc! { "deliveryDate": -1 })
        .limit(limit);
        self.orders.find(query).await
    }

    /// Query 3: document count from collection metadata.
    pub async fn estimated_count(&self) -> DbResult<u64> {
        self.orders.estimated_count().await
    }

    /// Exact document count.
    pub async fn count(&self) -> DbResult<u64> {
        self.orders.count().await
    }
}
