// src/planning/aggregate.rs

use crate::model::record::{DemandRecord, SkuHistory, WeeklyBucket};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDateTime) -> NaiveDate {
    let day = date.date();
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

// Running state of one (SKU, week) bucket while records stream in.
struct BucketAccumulator {
    demand_qty: f64,
    // Timestamp of the record currently providing the snapshot
    snapshot_at: NaiveDateTime,
    on_hand: f64,
    incoming: f64,
    lead_time_days: f64,
    moq: f64,
}

impl BucketAccumulator {
    fn new(record: &DemandRecord) -> Self {
        Self {
            demand_qty: record.demand_qty,
            snapshot_at: record.date,
            on_hand: record.on_hand,
            incoming: record.incoming,
            lead_time_days: record.lead_time_days,
            moq: record.moq,
        }
    }

    fn absorb(&mut self, record: &DemandRecord) {
        self.demand_qty += record.demand_qty;

        // Later-or-equal timestamps take over; equal ones fall back to input order
        if record.date >= self.snapshot_at {
            self.snapshot_at = record.date;
            self.on_hand = record.on_hand;
            self.incoming = record.incoming;
            self.lead_time_days = record.lead_time_days;
            self.moq = record.moq;
        }
    }

    fn into_bucket(self, sku: String, week: NaiveDate) -> WeeklyBucket {
        WeeklyBucket {
            sku,
            week,
            demand_qty: self.demand_qty,
            on_hand: self.on_hand,
            incoming: self.incoming,
            lead_time_days: self.lead_time_days,
            moq: self.moq,
        }
    }
}

/// Collapses demand records into one bucket per (SKU, ISO week).
///
/// Demand is summed. On-hand, incoming, lead time and MOQ come from the
/// latest record in the week, with ties going to the record that appears
/// later in `records`. Output is sorted by SKU, then by ascending week.
pub fn aggregate_weekly(records: &[DemandRecord]) -> Vec<WeeklyBucket> {
    let mut buckets: BTreeMap<(&str, NaiveDate), BucketAccumulator> = BTreeMap::new();

    for record in records {
        let key = (record.sku.as_str(), week_start(record.date));
        buckets
            .entry(key)
            .and_modify(|acc| acc.absorb(record))
            .or_insert_with(|| BucketAccumulator::new(record));
    }

    buckets
        .into_iter()
        .map(|((sku, week), acc)| acc.into_bucket(sku.to_string(), week))
        .collect()
}

/// Splits sorted buckets into one history per SKU, in SKU order.
pub fn group_by_sku(buckets: Vec<WeeklyBucket>) -> Vec<SkuHistory> {
    let mut histories: Vec<SkuHistory> = Vec::new();
    let mut current: Vec<WeeklyBucket> = Vec::new();

    for bucket in buckets {
        if current.first().is_some_and(|b| b.sku != bucket.sku) {
            let sku = current[0].sku.clone();
            histories.push(SkuHistory::new(sku, std::mem::take(&mut current)));
        }
        current.push(bucket);
    }

    if let Some(first) = current.first() {
        let sku = first.sku.clone();
        histories.push(SkuHistory::new(sku, current));
    }

    histories
}
