// src/strategy/risk.rs

use crate::model::recommendation::Risk;

/// Inputs the risk rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverContext {
    pub days_of_cover: f64,
    /// Lead time expressed in days (lead_time_weeks * 7).
    pub lead_time_days: f64,
    pub excess_cover_days: f64,
}

/// One row of the risk decision table.
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub risk: Risk,
    pub applies: fn(&CoverContext) -> bool,
}

/// Rules in priority order. The first rule that applies decides the label;
/// if none applies the SKU is [`Risk::Ok`].
pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        risk: Risk::StockoutRisk,
        applies: runs_out_within_lead_time,
    },
    RiskRule {
        risk: Risk::ExcessRisk,
        applies: exceeds_excess_threshold,
    },
];

// Stock runs out before a new order could land
fn runs_out_within_lead_time(c: &CoverContext) -> bool {
    c.days_of_cover < c.lead_time_days
}

fn exceeds_excess_threshold(c: &CoverContext) -> bool {
    c.days_of_cover > c.excess_cover_days
}

pub fn classify(context: &CoverContext) -> Risk {
    classify_with(RISK_RULES, context)
}

pub fn classify_with(rules: &[RiskRule], context: &CoverContext) -> Risk {
    rules
        .iter()
        .find(|rule| (rule.applies)(context))
        .map(|rule| rule.risk)
        .unwrap_or(Risk::Ok)
}
