//! # orderseed-core: Entities and Fake-Data Generators
//!
//! This crate holds the data model of the seeding run and the pure functions
//! that fill it with synthetic values. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        orderseed Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bin/seed (orderseed-db)                      │   │
//! │  │    CLI ──► SeedConfig ──► Seeder::run ──► QueryReport          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orderseed-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ generator │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │ fake_*    │  │  ranges   │  │   │
//! │  │   │  Order    │  │ "12.34"   │  │ (seeded)  │  │  counts   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Customer, Product, Store, Order) and snapshots
//! - [`money`] - Two-decimal price type stored in integer cents
//! - [`generator`] - Fake-data generators over any `rand::Rng`
//! - [`validation`] - Range and cardinality checks for generated records
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use orderseed_core::generator::fake_customer;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let customer = fake_customer(&mut rng);
//! assert_eq!(customer.phones.len(), 2);
//! assert_eq!(customer.emails.len(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod generator;
pub mod money;
pub mod plan;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use plan::SeedPlan;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Phone entries generated per customer.
pub const PHONES_PER_CUSTOMER: usize = 2;

/// Email entries generated per customer.
pub const EMAILS_PER_CUSTOMER: usize = 3;

/// Minimum line items in one order.
pub const MIN_ORDER_DETAILS: usize = 1;

/// Maximum line items in one order.
pub const MAX_ORDER_DETAILS: usize = 30;

/// Maximum quantity of a single line item.
pub const MAX_DETAIL_QUANTITY: i32 = 10;

/// Length of the generated purchase order code.
pub const PURCHASE_ORDER_LEN: usize = 15;
