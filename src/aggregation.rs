//! Daily roll-up of per-row estimates.
//!
//! Estimates that share a day, service, region and account collapse into
//! one line. Days keep the order they were first seen in, and lines within a
//! day keep their insertion order.

use crate::models::{EstimationResult, FootprintEstimate};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

type LineKey = (NaiveDate, String, String, String);

fn line_key(estimate: &FootprintEstimate) -> LineKey {
    (
        estimate.timestamp,
        estimate.service_name.clone(),
        estimate.region.clone(),
        estimate.account_id.clone(),
    )
}

/// Owned accumulator for one estimation run.
#[derive(Debug, Default, Clone)]
pub struct EstimateAccumulator {
    days: Vec<EstimationResult>,
    day_index: HashMap<NaiveDate, usize>,
    line_index: HashMap<LineKey, (usize, usize)>,
}

impl EstimateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums into an existing line for the same day/service/region/account,
    /// or appends a new one.
    pub fn append_or_accumulate(&mut self, estimate: FootprintEstimate) {
        let key = line_key(&estimate);
        if let Some(&(day, line)) = self.line_index.get(&key) {
            let existing = &mut self.days[day].service_estimates[line];
            existing.kilowatt_hours += estimate.kilowatt_hours;
            existing.co2e += estimate.co2e;
            existing.cost += estimate.cost;
            existing.uses_average_cpu_constant |= estimate.uses_average_cpu_constant;
            return;
        }

        let day = match self.day_index.get(&estimate.timestamp) {
            Some(&day) => day,
            None => {
                self.days.push(EstimationResult {
                    timestamp: estimate.timestamp,
                    service_estimates: Vec::new(),
                });
                let day = self.days.len() - 1;
                self.day_index.insert(estimate.timestamp, day);
                day
            }
        };

        let lines = &mut self.days[day].service_estimates;
        lines.push(estimate);
        self.line_index.insert(key, (day, lines.len() - 1));
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn finish(self) -> Vec<EstimationResult> {
        self.days
    }
}

pub fn aggregate_estimates_by_day<I>(estimates: I) -> Vec<EstimationResult>
where
    I: IntoIterator<Item = FootprintEstimate>,
{
    estimates
        .into_iter()
        .fold(EstimateAccumulator::new(), |mut acc, estimate| {
            acc.append_or_accumulate(estimate);
            acc
        })
        .finish()
}

/// Folds already-aggregated results again; a no-op on engine output.
pub fn reaggregate(results: &[EstimationResult]) -> Vec<EstimationResult> {
    aggregate_estimates_by_day(
        results
            .iter()
            .flat_map(|day| day.service_estimates.iter().cloned()),
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationTotals {
    pub kilowatt_hours: f64,
    pub co2e: f64,
    pub cost: f64,
    pub service_estimates: usize,
}

pub fn totals(results: &[EstimationResult]) -> EstimationTotals {
    results
        .iter()
        .flat_map(|day| day.service_estimates.iter())
        .fold(EstimationTotals::default(), |mut acc, e| {
            acc.kilowatt_hours += e.kilowatt_hours;
            acc.co2e += e.co2e;
            acc.cost += e.cost;
            acc.service_estimates += 1;
            acc
        })
}
