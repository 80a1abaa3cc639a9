// src/io/synthetic.rs

use crate::model::record::DemandRecord;
use chrono::{Duration, NaiveDate, NaiveTime};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Shape of generated weekly demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemandProfile {
    /// The same quantity every week. Useful for stability checks.
    Constant(f64),
    /// Bell-curve demand; draws are rounded to whole units and clamped at 0.
    Normal { mean: f64, std_dev: f64 },
    /// `before` until `at_week`, then `after`. The classic demand shock.
    Step { before: f64, after: f64, at_week: usize },
}

/// Stock position stamped on every generated record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockSnapshot {
    pub on_hand: f64,
    pub incoming: f64,
    pub lead_time_days: f64,
    pub moq: f64,
}

impl Default for StockSnapshot {
    fn default() -> Self {
        Self {
            on_hand: 20.0,
            incoming: 0.0,
            lead_time_days: 14.0,
            moq: 10.0,
        }
    }
}

/// Generates a weekly demand schedule.
///
/// # Arguments
/// * `profile` - Shape of the demand.
/// * `weeks` - Length of the schedule.
/// * `rng` - Source of randomness; pass a seeded RNG for repeatable output.
pub fn generate_schedule<R: Rng + ?Sized>(
    profile: DemandProfile,
    weeks: usize,
    rng: &mut R,
) -> Vec<f64> {
    match profile {
        DemandProfile::Constant(value) => vec![value; weeks],
        DemandProfile::Normal { mean, std_dev } => {
            // An invalid spread degenerates to constant demand at the mean
            let Ok(normal) = Normal::new(mean, std_dev) else {
                return vec![mean.max(0.0).round(); weeks];
            };
            (0..weeks)
                .map(|_| normal.sample(&mut *rng).round().max(0.0))
                .collect()
        }
        DemandProfile::Step { before, after, at_week } => (0..weeks)
            .map(|w| if w < at_week { before } else { after })
            .collect(),
    }
}

/// Builds one record per SKU per week, starting from the week of `start`.
pub fn generate_records<R: Rng + ?Sized>(
    skus: &[String],
    start: NaiveDate,
    weeks: usize,
    profile: DemandProfile,
    snapshot: StockSnapshot,
    rng: &mut R,
) -> Vec<DemandRecord> {
    let mut records = Vec::with_capacity(skus.len() * weeks);

    for sku in skus {
        let schedule = generate_schedule(profile, weeks, rng);
        for (week, demand_qty) in schedule.into_iter().enumerate() {
            let day = start + Duration::weeks(week as i64);
            records.push(DemandRecord {
                sku: sku.clone(),
                date: day.and_time(NaiveTime::MIN),
                demand_qty,
                on_hand: snapshot.on_hand,
                incoming: snapshot.incoming,
                lead_time_days: snapshot.lead_time_days,
                moq: snapshot.moq,
            });
        }
    }

    records
}
