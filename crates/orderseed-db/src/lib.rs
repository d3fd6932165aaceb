//! # orderseed-db: Database Layer and Seeder
//!
//! This crate loads the synthetic order data set into MongoDB and times a
//! few representative queries against it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        orderseed Data Flow                              │
//! │                                                                         │
//! │  bin/seed (clap flags + SeedConfig)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  orderseed-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Seeder     │    │  Repositories │    │    Store     │  │   │
//! │  │   │ (seeder.rs)   │    │ (repository/) │    │  (store/)    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ run / verify  │───►│ Repository<T> │───►│ MongoStore   │  │   │
//! │  │   │ QueryReport   │    │ OrderRepo     │    │ MemoryStore  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   MongoDB: customers, products, stores, orders                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - TOML file and environment configuration
//! - [`connection`] - Client creation and the [`Database`] handle
//! - [`store`] - The [`DocumentStore`] seam and its two backends
//! - [`repository`] - Typed access per collection
//! - [`seeder`] - The seeding run, sample queries and verification
//! - [`report`] - Timing and summary records
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orderseed_db::{Database, SeedConfig, Seeder};
//!
//! let config = SeedConfig::load(None)?;
//! let db = Database::connect(config.to_db_config()).await?;
//!
//! let summary = Seeder::new(db, config.plan).run().await?;
//! println!("{} orders written", summary.orders);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod connection;
pub mod error;
pub mod report;
pub mod repository;
pub mod seeder;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DatabaseSettings, SeedConfig};
pub use connection::{Database, DbConfig};
pub use error::{DbError, DbResult};
pub use report::{QueryReport, SeedSummary, VerifyReport};
pub use seeder::Seeder;
pub use store::{DocumentStore, FindQuery, MemoryStore, MongoStore};

// Repository re-exports for convenience
pub use repository::{Entity, OrderRepository, Repository};
