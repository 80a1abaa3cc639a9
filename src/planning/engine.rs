// src/planning/engine.rs

use crate::model::record::{DemandRecord, SkuHistory};
use crate::model::recommendation::Recommendation;
use crate::planning::aggregate::{aggregate_weekly, group_by_sku};
use crate::planning::config::PlannerConfig;
use crate::strategy::forecast::{estimate, ExponentialSmoothing};
use crate::strategy::optimization::{plan, PlanInputs, PlanParams};
use crate::strategy::traits::DemandForecaster;
use tracing::{debug, info};

/// Runs the weekly replenishment calculation over one input table.
///
/// Holds only configuration; every call to [`ReplenishmentEngine::run`] is
/// independent of the previous ones.
#[derive(Debug)]
pub struct ReplenishmentEngine {
    config: PlannerConfig,
    forecaster: Box<dyn DemandForecaster>,
}

impl ReplenishmentEngine {
    /// Engine using exponential smoothing with the configured alpha.
    pub fn new(config: PlannerConfig) -> Self {
        let forecaster = Box::new(ExponentialSmoothing::new(config.smoothing_alpha));
        Self { config, forecaster }
    }

    /// Engine with a custom forecast model. `config.smoothing_alpha` is ignored.
    pub fn with_forecaster(config: PlannerConfig, forecaster: Box<dyn DemandForecaster>) -> Self {
        Self { config, forecaster }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Produces one recommendation per SKU present in `records`, in SKU order.
    pub fn run(&self, records: &[DemandRecord]) -> Vec<Recommendation> {
        let buckets = aggregate_weekly(records);
        let histories = group_by_sku(buckets);
        info!(
            records = records.len(),
            skus = histories.len(),
            "aggregated demand into weekly buckets"
        );

        histories
            .iter()
            .filter_map(|history| self.recommend(history))
            .collect()
    }

    /// Forecasts and plans a single SKU. `None` for an empty history.
    pub fn recommend(&self, history: &SkuHistory) -> Option<Recommendation> {
        let latest = history.latest()?;

        let window = history.trailing_demand(self.config.history_weeks);
        let estimate = estimate(self.forecaster.as_ref(), &window);

        let inputs = PlanInputs {
            forecast: estimate.forecast,
            variability: estimate.variability,
            on_hand: latest.on_hand,
            incoming: latest.incoming,
            lead_time_days: latest.lead_time_days,
            moq: latest.moq,
        };
        let params = PlanParams {
            service_level_z: self.config.service_level_z,
            excess_cover_days: self.config.excess_cover_days,
        };
        let outcome = plan(&inputs, &params);

        debug!(
            sku = %history.sku,
            weeks = window.len(),
            forecast = estimate.forecast,
            order_qty = outcome.order_qty,
            risk = %outcome.risk,
            "planned sku"
        );

        Some(Recommendation {
            sku: history.sku.clone(),
            forecast: estimate.forecast,
            variability: estimate.variability,
            on_hand: latest.on_hand,
            incoming: latest.incoming,
            days_of_cover: outcome.days_of_cover,
            safety_stock: outcome.safety_stock,
            order_qty: outcome.order_qty,
            risk: outcome.risk,
        })
    }
}

impl Default for ReplenishmentEngine {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
