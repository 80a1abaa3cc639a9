// src/model/record.rs

use chrono::{NaiveDate, NaiveDateTime};

/// One cleaned demand observation for a SKU.
///
/// Every numeric field is already coerced (invalid input becomes 0.0) by the
/// time a record reaches the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandRecord {
    pub sku: String,
    pub date: NaiveDateTime,
    pub demand_qty: f64,
    pub on_hand: f64,
    pub incoming: f64,
    pub lead_time_days: f64,
    pub moq: f64,
}

/// Demand for one SKU in one ISO week, plus the latest stock snapshot seen that week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyBucket {
    pub sku: String,
    /// Monday of the ISO week.
    pub week: NaiveDate,
    /// Sum of demand across the week.
    pub demand_qty: f64,

    // Snapshot fields: last observation in the week, never summed
    pub on_hand: f64,
    pub incoming: f64,
    pub lead_time_days: f64,
    pub moq: f64,
}

/// The week-ordered buckets of a single SKU.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuHistory {
    pub sku: String,
    buckets: Vec<WeeklyBucket>,
}

impl SkuHistory {
    /// Builds a history from buckets that all belong to `sku` and are already
    /// sorted by ascending week.
    pub fn new(sku: String, buckets: Vec<WeeklyBucket>) -> Self {
        debug_assert!(buckets.iter().all(|b| b.sku == sku));
        debug_assert!(buckets.windows(2).all(|w| w[0].week < w[1].week));
        Self { sku, buckets }
    }

    /// Demand of the trailing `weeks` buckets, oldest first.
    pub fn trailing_demand(&self, weeks: usize) -> Vec<f64> {
        let start = self.buckets.len().saturating_sub(weeks);
        self.buckets[start..].iter().map(|b| b.demand_qty).collect()
    }

    /// The most recent bucket, which carries the current stock snapshot.
    pub fn latest(&self) -> Option<&WeeklyBucket> {
        self.buckets.last()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
