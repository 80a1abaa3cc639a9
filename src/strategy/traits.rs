// src/strategy/traits.rs

use std::fmt::Debug;

/// Turns a SKU's recent weekly demand into a single weekly estimate.
///
/// Implementations are pure: the same history always yields the same estimate.
/// `Send` + `Sync` so SKUs can be forecast in parallel.
pub trait DemandForecaster: Debug + Send + Sync {
    /// Estimates next week's demand.
    ///
    /// # Arguments
    /// * `history` - Weekly demand, oldest first. May be empty.
    fn forecast(&self, history: &[f64]) -> f64;
}
