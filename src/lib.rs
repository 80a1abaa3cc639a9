// src/lib.rs

//! Weekly replenishment planning for small inventories.
//!
//! Demand records are bucketed per SKU and ISO week, the trailing weeks are
//! smoothed into a forecast, and each SKU gets a safety stock, an MOQ-rounded
//! order quantity and a risk label.
//!
//! ```no_run
//! use replenishment_planner::io::{demand, reporting};
//! use replenishment_planner::planning::engine::ReplenishmentEngine;
//!
//! # fn main() -> replenishment_planner::error::Result<()> {
//! let records = demand::load_demand_file("demand.csv")?;
//! let recommendations = ReplenishmentEngine::default().run(&records);
//! let report = reporting::build_report(&recommendations);
//! reporting::write_report_file("recommendations.csv", &report)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod io;
pub mod model;
pub mod planning;
pub mod strategy;
