//! Timing and outcome reports produced by a seeding run.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Timings of the three sample queries after one order batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    /// 1-based batch number the report follows.
    pub batch: usize,
    /// Result of query 3.
    pub total_documents: u64,
    pub query1_ms: u64,
    pub query1_returned: usize,
    pub query2_ms: u64,
    pub query2_returned: usize,
    pub query3_ms: u64,
}

pub(crate) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// One line: total padded to 12, each timing padded to 6.
impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "=== Queries response time  === Total documents: {:>12}, Query 1: {:>6} ms, Query 2: {:>6} ms, Query 3: {:>6} ms",
            self.total_documents, self.query1_ms, self.query2_ms, self.query3_ms
        )
    }
}

/// What a full run wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub customers: usize,
    pub products: usize,
    pub stores: usize,
    pub orders: usize,
    pub indexes: Vec<String>,
    pub batches: Vec<QueryReport>,
}

/// What `Seeder::verify` checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub customers: u64,
    pub products: u64,
    pub stores: u64,
    pub orders: u64,
    pub orders_checked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_line_padding() {
        let report = QueryReport {
            batch: 1,
            total_documents: 50_000,
            query1_ms: 3,
            query1_returned: 0,
            query2_ms: 41,
            query2_returned: 10,
            query3_ms: 0,
        };
        assert_eq!(
            report.to_string(),
            "=== Queries response time  === Total documents:        50000, Query 1:      3 ms, Query 2:     41 ms, Query 3:      0 ms"
        );
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(Duration::from_micros(2_500)), 2);
        assert_eq!(millis(Duration::from_secs(1)), 1000);
    }
}
