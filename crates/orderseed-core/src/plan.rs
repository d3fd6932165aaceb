//! # Seed Plan
//!
//! How many records one run writes, and what the sample queries look for.

use serde::{Deserialize, Serialize};

/// Default email probed by the first sample query.
pub const DEFAULT_PROBE_EMAIL: &str = "Russ51@hotmail.com";

/// Default product names probed by the second sample query.
pub const DEFAULT_PROBE_PRODUCTS: &[&str] = &["Mango Pie", "Lemon Pie", "Orange Pie", "Apple Pie"];

/// Record counts and query probes for one run.
///
/// ## Defaults
/// ```text
/// customers         10,000
/// products          10,000
/// stores            10,000
/// orders_per_batch  50,000
/// order_batches         10   (500,000 orders total)
/// insert_chunk_size 10,000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedPlan {
    pub customers: usize,
    pub products: usize,
    pub stores: usize,
    pub orders_per_batch: usize,
    pub order_batches: usize,
    /// Documents per `insert_many` call.
    pub insert_chunk_size: usize,
    pub probe_email: String,
    pub probe_products: Vec<String>,
}

impl Default for SeedPlan {
    fn default() -> Self {
        SeedPlan {
            customers: 10_000,
            products: 10_000,
            stores: 10_000,
            orders_per_batch: 50_000,
            order_batches: 10,
            insert_chunk_size: 10_000,
            probe_email: DEFAULT_PROBE_EMAIL.to_string(),
            probe_products: DEFAULT_PROBE_PRODUCTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SeedPlan {
    /// Orders written across every batch, saturating at `usize::MAX`.
    pub fn total_orders(&self) -> usize {
        self.orders_per_batch.saturating_mul(self.order_batches)
    }

    /// Orders written across every batch, or `None` if the product overflows.
    pub fn checked_total_orders(&self) -> Option<usize> {
        self.orders_per_batch.checked_mul(self.order_batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_totals() {
        let plan = SeedPlan::default();
        assert_eq!(plan.total_orders(), 500_000);
        assert_eq!(plan.probe_products.len(), 4);
    }

    #[test]
    fn test_total_orders_overflow() {
        let plan = SeedPlan {
            orders_per_batch: usize::MAX / 2 + 1,
            order_batches: 2,
            ..SeedPlan::default()
        };
        assert_eq!(plan.checked_total_orders(), None);
        assert_eq!(plan.total_orders(), usize::MAX);
    }
}
