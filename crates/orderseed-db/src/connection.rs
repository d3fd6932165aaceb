//! # Database Connection
//!
//! Client creation and configuration for MongoDB.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection                                │
//! │                                                                         │
//! │  bin/seed startup                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(uri, name) ← Configure client settings                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect(config).await ← Parse URI, build client, ping       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │   Arc<dyn DocumentStore>                │                           │
//! │  │   MongoStore  (or MemoryStore in tests) │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.customers() / products() / stores() / orders()                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::Client;
use orderseed_core::{Customer, Product, Store};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::order::OrderRepository;
use crate::repository::{Entity, Repository};
use crate::store::{DocumentStore, MemoryStore, MongoStore};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("mongodb://localhost:27017", "orderseed")
///     .max_pool_size(4)
///     .server_selection_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// MongoDB connection string.
    pub uri: String,

    /// Database the collections live in.
    pub database_name: String,

    /// Reported to the server in the handshake.
    /// Default: "orderseed"
    pub app_name: String,

    /// Maximum connections in the driver's pool.
    /// Default: 10
    pub max_pool_size: u32,

    /// TCP connect timeout.
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// How long to wait for a usable server.
    /// Default: 30 seconds
    pub server_selection_timeout: Duration,
}

impl DbConfig {
    /// Creates a configuration for the given URI and database name.
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        DbConfig {
            uri: uri.into(),
            database_name: database_name.into(),
            app_name: "orderseed".to_string(),
            max_pool_size: 10,
            connect_timeout: Duration::from_secs(10),
            server_selection_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the application name sent in the handshake.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_pool_size(mut self, max: u32) -> Self {
        self.max_pool_size = max;
        self
    }

    /// Sets the TCP connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets how long to wait for a usable server.
    pub fn server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone: every clone shares the same store.
#[derive(Debug, Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    /// Connects to MongoDB and checks the server answers.
    ///
    /// ## What This Does
    /// 1. Parses the connection string (SRV lookups happen here)
    /// 2. Applies app name, pool size and timeouts from `config`
    /// 3. Builds the client and selects `config.database_name`
    /// 4. Sends `ping` so a bad URI fails before any data is generated
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        info!(
            database = %config.database_name,
            "Initializing database connection"
        );

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        options.app_name = Some(config.app_name.clone());
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.server_selection_timeout);

        debug!("Client options configured");

        let client =
            Client::with_options(options).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        let db = Database::with_store(Arc::new(MongoStore::new(
            client.database(&config.database_name),
        )));

        db.store.ping().await?;
        info!(max_pool_size = config.max_pool_size, "Database client ready");

        Ok(db)
    }

    /// An isolated in-memory database (for testing).
    pub fn in_memory() -> Self {
        Database::with_store(Arc::new(MemoryStore::new()))
    }

    /// Wraps any store implementation.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Database { store }
    }

    /// The underlying store, for queries not covered by repositories.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn customers(&self) -> Repository<Customer> {
        Repository::new(self.store.clone())
    }

    pub fn products(&self) -> Repository<Product> {
        Repository::new(self.store.clone())
    }

    pub fn stores(&self) -> Repository<Store> {
        Repository::new(self.store.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }

    /// Drops all four seeded collections.
    pub async fn drop_all(&self) -> DbResult<()> {
        info!("Dropping collections");
        for collection in [
            Customer::COLLECTION,
            Product::COLLECTION,
            Store::COLLECTION,
            orderseed_core::Order::COLLECTION,
        ] {
            self.store.drop_collection(collection).await?;
        }
        Ok(())
    }

    /// Checks if the database answers a ping.
    pub async fn health_check(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
