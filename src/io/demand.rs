// src/io/demand.rs

use crate::error::{Error, Result};
use crate::model::record::DemandRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Columns a demand file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "sku",
    "date",
    "demand_qty",
    "on_hand",
    "incoming",
    "lead_time_days",
    "moq",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// A row as it appears in the file, before coercion
#[derive(Debug, Deserialize)]
struct RawDemandRow {
    sku: String,
    date: String,
    demand_qty: String,
    on_hand: String,
    incoming: String,
    lead_time_days: String,
    moq: String,
}

/// Parses a numeric cell. Empty, malformed and non-finite values become 0.0.
pub fn coerce_number(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses a date or timestamp cell into a naive timestamp.
///
/// Timezone-aware RFC 3339 values keep their local wall-clock time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Reads and cleans demand records from CSV.
///
/// Fails if any required column is missing or a date cannot be parsed.
/// Rows with a blank SKU are skipped.
pub fn load_demand<R: Read>(reader: R) -> Result<Vec<DemandRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(Error::MissingColumns(missing));
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or_default();
        let raw: RawDemandRow = row.deserialize(Some(&headers))?;

        if raw.sku.is_empty() {
            skipped += 1;
            continue;
        }

        let date = parse_timestamp(&raw.date).ok_or_else(|| Error::InvalidDate {
            line,
            value: raw.date.clone(),
        })?;

        records.push(DemandRecord {
            sku: raw.sku,
            date,
            demand_qty: coerce_number(&raw.demand_qty),
            on_hand: coerce_number(&raw.on_hand),
            incoming: coerce_number(&raw.incoming),
            lead_time_days: coerce_number(&raw.lead_time_days),
            moq: coerce_number(&raw.moq),
        });
    }

    if skipped > 0 {
        warn!(skipped, "skipped demand rows without a sku");
    }
    info!(rows = records.len(), "loaded demand records");

    Ok(records)
}

pub fn load_demand_file(path: impl AsRef<Path>) -> Result<Vec<DemandRecord>> {
    let file = std::fs::File::open(path)?;
    load_demand(file)
}

/// Writes demand records with the columns [`load_demand`] expects.
pub fn write_demand<W: std::io::Write>(writer: W, records: &[DemandRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(REQUIRED_COLUMNS)?;

    for r in records {
        wtr.write_record([
            r.sku.clone(),
            r.date.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            r.demand_qty.to_string(),
            r.on_hand.to_string(),
            r.incoming.to_string(),
            r.lead_time_days.to_string(),
            r.moq.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
