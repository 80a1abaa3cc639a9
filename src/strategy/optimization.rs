// src/strategy/optimization.rs

//! Replenishment arithmetic: safety stock, order quantity and cover.
//!
//! Lead-time demand is the weekly forecast scaled by the lead time in weeks.
//! Safety stock protects against demand error over that lead time assuming
//! normally distributed, independent weekly demand:
//!
//! SafetyStock = Z * StdDev_weekly * sqrt(LeadTimeWeeks)
//!
//! The order brings net stock (on hand + incoming) up to lead-time demand
//! plus safety stock, rounded up to the supplier's MOQ.

use crate::model::recommendation::{DaysOfCover, Risk};
use crate::strategy::risk::{classify, CoverContext};

/// Current position of one SKU together with its demand estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanInputs {
    pub forecast: f64,
    pub variability: f64,
    pub on_hand: f64,
    pub incoming: f64,
    pub lead_time_days: f64,
    pub moq: f64,
}

/// Parameters that are fixed across SKUs within one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanParams {
    pub service_level_z: f64,
    pub excess_cover_days: f64,
}

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            service_level_z: 1.65,
            excess_cover_days: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOutcome {
    pub safety_stock: f64,
    pub order_qty: f64,
    pub days_of_cover: DaysOfCover,
    pub risk: Risk,
}

/// Buffer stock for demand error over the lead time. Zero without lead time.
pub fn safety_stock(z: f64, variability: f64, lead_time_weeks: f64) -> f64 {
    if lead_time_weeks > 0.0 {
        z * variability * lead_time_weeks.sqrt()
    } else {
        0.0
    }
}

/// Rounds a positive quantity up to the next multiple of `moq`.
/// Quantities of zero and non-positive MOQs pass through unchanged.
pub fn round_up_to_moq(qty: f64, moq: f64) -> f64 {
    if moq > 0.0 && qty > 0.0 {
        (qty / moq).ceil() * moq
    } else {
        qty
    }
}

pub fn days_of_cover(net_stock: f64, forecast: f64) -> DaysOfCover {
    if forecast > 0.0 {
        DaysOfCover::Days(net_stock / forecast * 7.0)
    } else {
        DaysOfCover::Unbounded
    }
}

/// Computes safety stock, order quantity, cover and risk for one SKU.
pub fn plan(inputs: &PlanInputs, params: &PlanParams) -> PlanOutcome {
    let lead_time_weeks = inputs.lead_time_days / 7.0;
    let demand_during_lead_time = inputs.forecast * lead_time_weeks;
    let safety_stock = safety_stock(params.service_level_z, inputs.variability, lead_time_weeks);

    let net_stock = inputs.on_hand + inputs.incoming;

    // We cannot order negative amounts; a surplus simply means no order.
    let raw_order_qty = (demand_during_lead_time + safety_stock - net_stock).max(0.0);
    let order_qty = round_up_to_moq(raw_order_qty, inputs.moq);

    let days_of_cover = days_of_cover(net_stock, inputs.forecast);
    let risk = classify(&CoverContext {
        days_of_cover: days_of_cover.days(),
        lead_time_days: lead_time_weeks * 7.0,
        excess_cover_days: params.excess_cover_days,
    });

    PlanOutcome {
        safety_stock,
        order_qty,
        days_of_cover,
        risk,
    }
}
