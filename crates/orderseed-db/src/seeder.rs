//! # Seeder
//!
//! Generates the synthetic data set and loads it, one awaited step at a time.
//!
//! ## Run Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  drop_all                                                               │
//! │  create_customers ─┐                                                   │
//! │  create_products  ─┼─ must exist before orders reference them          │
//! │  create_stores    ─┘                                                   │
//! │  create_indexes                                                         │
//! │  repeat order_batches times:                                           │
//! │      create_orders      load snapshots → generate → insert             │
//! │      run_some_queries   3 timed reads → QueryReport (logged)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any error aborts the run. Nothing is retried or rolled back.

use std::collections::HashSet;
use std::time::Instant;

use bson::oid::ObjectId;
use bson::{doc, Bson};
use orderseed_core::generator::{fake_customer, fake_order, fake_product, fake_store};
use orderseed_core::{Customer, Order, Product, SeedPlan, Store, ValidationError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::connection::Database;
use crate::error::{DbError, DbResult};
use crate::report::{millis, QueryReport, SeedSummary, VerifyReport};
use crate::repository::{Entity, Repository};
use crate::store::FindQuery;

/// Rows returned by each of the two sample finds.
pub const QUERY_LIMIT: i64 = 10;

/// Orders read back and validated by [`Seeder::verify`].
pub const VERIFY_SAMPLE: i64 = 1_000;

/// Drives one seeding run against a [`Database`].
#[derive(Debug)]
pub struct Seeder<R = StdRng> {
    db: Database,
    plan: SeedPlan,
    rng: R,
    batches_run: usize,
}

impl Seeder<StdRng> {
    /// A seeder drawing from OS entropy.
    pub fn new(db: Database, plan: SeedPlan) -> Self {
        Seeder::with_rng(db, plan, StdRng::from_entropy())
    }

    /// A seeder whose generated field values repeat for the same `seed`.
    pub fn with_seed(db: Database, plan: SeedPlan, seed: u64) -> Self {
        Seeder::with_rng(db, plan, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> Seeder<R> {
    /// A seeder drawing from the given generator.
    pub fn with_rng(db: Database, plan: SeedPlan, rng: R) -> Self {
        Seeder {
            db,
            plan,
            rng,
            batches_run: 0,
        }
    }

    /// The plan this seeder runs.
    pub fn plan(&self) -> &SeedPlan {
        &self.plan
    }

    /// The database being seeded.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Entity Creation
    // =========================================================================

    pub async fn create_customers(&mut self) -> DbResult<usize> {
        info!("Creating customers...");
        let customers: Vec<Customer> = (0..self.plan.customers)
            .map(|_| fake_customer(&mut self.rng))
            .collect();

        let count = self
            .db
            .customers()
            .insert_all(&customers, self.plan.insert_chunk_size)
            .await?;
        info!(count, "Inserted customers");
        Ok(count)
    }

    pub async fn create_products(&mut self) -> DbResult<usize> {
        info!("Creating products...");
        let products: Vec<Product> = (0..self.plan.products)
            .map(|_| fake_product(&mut self.rng))
            .collect();

        let count = self
            .db
            .products()
            .insert_all(&products, self.plan.insert_chunk_size)
            .await?;
        info!(count, "Inserted products");
        Ok(count)
    }

    pub async fn create_stores(&mut self) -> DbResult<usize> {
        info!("Creating stores...");
        let stores: Vec<Store> = (0..self.plan.stores)
            .map(|_| fake_store(&mut self.rng))
            .collect();

        let count = self
            .db
            .stores()
            .insert_all(&stores, self.plan.insert_chunk_size)
            .await?;
        info!(count, "Inserted stores");
        Ok(count)
    }

    /// Generates one batch of orders from what is currently in the database.
    ///
    /// Every order gets its own generation instant, truncated to the
    /// millisecond precision documents store.
    pub async fn create_orders(&mut self) -> DbResult<usize> {
        info!("Creating orders...");
        let customers = self.db.customers().load_snapshots().await?;
        let products = self.db.products().load_snapshots().await?;
        let stores = self.db.stores().load_snapshots().await?;
        debug!(
            customers = customers.len(),
            products = products.len(),
            stores = stores.len(),
            "Loaded order references"
        );

        let orders = (0..self.plan.orders_per_batch)
            .map(|_| {
                let now = bson::DateTime::now().to_chrono();
                fake_order(&mut self.rng, &customers, &stores, &products, now)
            })
            .collect::<Result<Vec<Order>, _>>()?;

        let count = self
            .db
            .orders()
            .insert_all(&orders, self.plan.insert_chunk_size)
            .await?;
        info!(count, "Inserted orders");
        Ok(count)
    }

    pub async fn create_indexes(&self) -> DbResult<Vec<String>> {
        info!("Creating indexes...");
        self.db.orders().create_indexes().await
    }

    // =========================================================================
    // Sample Queries
    // =========================================================================

    /// Runs and times the three sample reads, logging the one-line report.
    pub async fn run_some_queries(&self) -> DbResult<QueryReport> {
        info!("Running queries...");
        let orders = self.db.orders();

        info!("Running Query 1: Find last order by customer email");
        let start = Instant::now();
        let result1 = orders
            .last_orders_by_email(&self.plan.probe_email, QUERY_LIMIT)
            .await?;
        let query1 = start.elapsed();

        info!("Running Query 2: Find last delivered orders for some products");
        let start = Instant::now();
        let result2 = orders
            .delivered_orders_for_products(&self.plan.probe_products, QUERY_LIMIT)
            .await?;
        let query2 = start.elapsed();

        info!("Running Query 3: Estimated count of orders");
        let start = Instant::now();
        let total_documents = orders.estimated_count().await?;
        let query3 = start.elapsed();

        let report = QueryReport {
            batch: self.batches_run,
            total_documents,
            query1_ms: millis(query1),
            query1_returned: result1.len(),
            query2_ms: millis(query2),
            query2_returned: result2.len(),
            query3_ms: millis(query3),
        };
        info!("{report}");
        Ok(report)
    }

    // =========================================================================
    // Full Run
    // =========================================================================

    /// Drops everything, then seeds according to the plan.
    pub async fn run(&mut self) -> DbResult<SeedSummary> {
        self.db.drop_all().await?;
        self.batches_run = 0;

        let customers = self.create_customers().await?;
        let products = self.create_products().await?;
        let stores = self.create_stores().await?;
        let indexes = self.create_indexes().await?;

        let total = self.plan.order_batches;
        let mut orders = 0;
        let mut batches = Vec::with_capacity(total);
        for batch in 1..=total {
            info!(batch, total, "Inserting batch of orders...");
            orders += self.create_orders().await?;
            self.batches_run = batch;

            info!(batch, "Finished batch. Running some queries...");
            batches.push(self.run_some_queries().await?);
        }

        info!("All tasks completed successfully!");
        Ok(SeedSummary {
            customers,
            products,
            stores,
            orders,
            indexes,
            batches,
        })
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Checks the collections against the plan.
    ///
    /// ## Checks
    /// 1. exact customers/products/stores/orders counts equal the plan's totals
    /// 2. a sample of orders passes `validate_order`
    /// 3. every customer, store and product embedded in the sample still
    ///    exists under the same `_id`
    pub async fn verify(&self) -> DbResult<VerifyReport> {
        info!("Verifying seeded collections...");

        let customers = expect_count(&self.db.customers(), self.plan.customers).await?;
        let products = expect_count(&self.db.products(), self.plan.products).await?;
        let stores = expect_count(&self.db.stores(), self.plan.stores).await?;

        let orders_repo = self.db.orders();
        let orders = orders_repo.count().await?;
        let expected_orders = self.plan.total_orders() as u64;
        if orders != expected_orders {
            return Err(DbError::CountMismatch {
                collection: Order::COLLECTION.to_string(),
                expected: expected_orders,
                actual: orders,
            });
        }

        let sample = orders_repo.sample(VERIFY_SAMPLE).await?;
        for order in &sample {
            orderseed_core::validation::validate_order(order)?;
        }

        let customer_ids: HashSet<ObjectId> = sample.iter().map(|o| o.customer.id).collect();
        let store_ids: HashSet<ObjectId> = sample.iter().map(|o| o.store.id).collect();
        let product_ids: HashSet<ObjectId> = sample
            .iter()
            .flat_map(|o| o.details.iter().map(|d| d.product.id))
            .collect();

        expect_present(&self.db.customers(), &customer_ids, "customer._id").await?;
        expect_present(&self.db.stores(), &store_ids, "store._id").await?;
        expect_present(&self.db.products(), &product_ids, "details.product._id").await?;

        let report = VerifyReport {
            customers,
            products,
            stores,
            orders,
            orders_checked: sample.len(),
        };
        info!(orders_checked = report.orders_checked, "Verification passed");
        Ok(report)
    }
}

async fn expect_count<T: Entity>(repo: &Repository<T>, expected: usize) -> DbResult<u64> {
    let actual = repo.count().await?;
    if actual != expected as u64 {
        return Err(DbError::CountMismatch {
            collection: T::COLLECTION.to_string(),
            expected: expected as u64,
            actual,
        });
    }
    Ok(actual)
}

/// Fails unless every id in `ids` names a document in the repository's collection.
async fn expect_present<T: Entity>(
    repo: &Repository<T>,
    ids: &HashSet<ObjectId>,
    field: &str,
) -> DbResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let wanted: Vec<Bson> = ids.iter().copied().map(Bson::ObjectId).collect();
    let query = FindQuery::filter(doc! { "_id": { "$in": wanted } }).projection(doc! { "_id": 1 });
    let found = repo.find_ids(query).await?;

    if found.len() != ids.len() {
        return Err(ValidationError::Mismatch {
            field: field.to_string(),
            other: format!("{} ({} of {} found)", T::COLLECTION, found.len(), ids.len()),
        }
        .into());
    }
    Ok(())
}
