// src/model/recommendation.rs

use serde::Serialize;
use std::fmt;

/// Days of cover reported when a SKU has no measurable demand.
pub const UNBOUNDED_COVER_DAYS: f64 = 999.0;

/// Risk label attached to each SKU's recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Risk {
    #[serde(rename = "Stockout Risk")]
    StockoutRisk,
    #[serde(rename = "Excess Risk")]
    ExcessRisk,
    #[serde(rename = "OK")]
    Ok,
}

impl Risk {
    pub fn label(&self) -> &'static str {
        match self {
            Risk::StockoutRisk => "Stockout Risk",
            Risk::ExcessRisk => "Excess Risk",
            Risk::Ok => "OK",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How long current plus incoming stock lasts at the forecast rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DaysOfCover {
    Days(f64),
    /// Forecast is zero, so cover cannot be measured.
    Unbounded,
}

impl DaysOfCover {
    /// Numeric value used for risk rules and reports. `Unbounded` maps to
    /// [`UNBOUNDED_COVER_DAYS`].
    pub fn days(&self) -> f64 {
        match self {
            DaysOfCover::Days(d) => *d,
            DaysOfCover::Unbounded => UNBOUNDED_COVER_DAYS,
        }
    }
}

/// The planner's verdict for one SKU.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub sku: String,
    /// Smoothed weekly demand.
    pub forecast: f64,
    /// Sample standard deviation of the weekly demand window.
    pub variability: f64,
    pub on_hand: f64,
    pub incoming: f64,
    pub days_of_cover: DaysOfCover,
    pub safety_stock: f64,
    pub order_qty: f64,
    pub risk: Risk,
}
