// src/io/reporting.rs

use crate::error::Result;
use crate::model::recommendation::{Recommendation, Risk};
use crate::strategy::risk::RISK_RULES;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Header of the exported table, in column order.
pub const REPORT_COLUMNS: [&str; 8] = [
    "SKU",
    "Forecast (avg weekly)",
    "On Hand",
    "Incoming",
    "Days of Cover",
    "Safety Stock",
    "Recommended Order Qty",
    "Risk",
];

/// One row of the exported recommendation table, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Forecast (avg weekly)")]
    pub forecast: f64,
    #[serde(rename = "On Hand")]
    pub on_hand: f64,
    #[serde(rename = "Incoming")]
    pub incoming: f64,
    #[serde(rename = "Days of Cover")]
    pub days_of_cover: f64,
    #[serde(rename = "Safety Stock")]
    pub safety_stock: f64,
    #[serde(rename = "Recommended Order Qty")]
    pub order_qty: f64,
    #[serde(rename = "Risk")]
    pub risk: Risk,
}

impl From<&Recommendation> for ReportRow {
    fn from(rec: &Recommendation) -> Self {
        Self {
            sku: rec.sku.clone(),
            forecast: round_to(rec.forecast, 2),
            on_hand: round_to(rec.on_hand, 2),
            incoming: round_to(rec.incoming, 2),
            days_of_cover: round_to(rec.days_of_cover.days(), 1),
            safety_stock: round_to(rec.safety_stock, 2),
            order_qty: round_to(rec.order_qty, 2),
            risk: rec.risk,
        }
    }
}

/// Rounds to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Builds the output table: rounded rows, largest order first.
///
/// The sort is stable, so SKUs with equal orders keep their planning order.
pub fn build_report(recommendations: &[Recommendation]) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = recommendations.iter().map(ReportRow::from).collect();
    rows.sort_by(|a, b| b.order_qty.total_cmp(&a.order_qty));
    rows
}

/// Serializes the report as CSV with a header row.
pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    // serialize() only emits the header alongside the first row
    if rows.is_empty() {
        wtr.write_record(REPORT_COLUMNS)?;
    }

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the report to a CSV file.
///
/// # Arguments
/// * `path` - Destination file (e.g., "recommendations.csv").
/// * `rows` - Rows from [`build_report`].
pub fn write_report_file(path: impl AsRef<Path>, rows: &[ReportRow]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_report(file, rows)?;

    info!(rows = rows.len(), path = %path.display(), "exported recommendations");
    Ok(())
}

/// Number of SKUs per risk label, in rule priority order with OK last.
pub fn risk_summary(rows: &[ReportRow]) -> Vec<(Risk, usize)> {
    RISK_RULES
        .iter()
        .map(|rule| rule.risk)
        .chain(std::iter::once(Risk::Ok))
        .map(|risk| (risk, rows.iter().filter(|r| r.risk == risk).count()))
        .collect()
}
