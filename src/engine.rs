use crate::aggregation::{totals, EstimateAccumulator, EstimationTotals};
use crate::constants::{CloudConstants, ConstantsCatalog};
use crate::estimators::{
    ComputeEstimator, FootprintEstimator, MemoryEstimator, NetworkingEstimator, StorageEstimator,
    Usage,
};
use crate::models::{
    CloudProvider, DateRange, EstimationResult, FootprintEstimate, UsageRow, UNKNOWN_REGION,
};
use crate::usage_types::{classify, StorageClass, UsageKind};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// The estimator set for one provider, built from its constants.
#[derive(Debug, Clone)]
struct ProviderEstimators {
    constants: CloudConstants,
    compute: ComputeEstimator,
    ssd: StorageEstimator,
    hdd: StorageEstimator,
    networking: NetworkingEstimator,
    memory: MemoryEstimator,
}

impl ProviderEstimators {
    fn new(constants: CloudConstants) -> Self {
        Self {
            compute: ComputeEstimator::new(),
            ssd: StorageEstimator::new(constants.ssd_coefficient()),
            hdd: StorageEstimator::new(constants.hdd_coefficient()),
            networking: NetworkingEstimator::new(constants.networking_coefficient()),
            memory: MemoryEstimator::new(constants.memory_coefficient()),
            constants,
        }
    }

    fn estimator_for(&self, kind: UsageKind) -> Option<&dyn FootprintEstimator> {
        match kind {
            UsageKind::Compute => Some(&self.compute),
            UsageKind::Storage(StorageClass::Ssd) => Some(&self.ssd),
            UsageKind::Storage(StorageClass::Hdd) => Some(&self.hdd),
            UsageKind::Networking => Some(&self.networking),
            UsageKind::Memory => Some(&self.memory),
            UsageKind::Unsupported => None,
        }
    }

    fn replication_factor(&self, row: &UsageRow) -> f64 {
        row.replication_factor.unwrap_or_else(|| {
            self.constants
                .replication_factor(&row.service_name, &row.usage_type)
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows: usize,
    pub estimated: usize,
    pub skipped: usize,
}

/// Grand totals for one run plus the number of rows that produced nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationSummary {
    #[serde(flatten)]
    pub totals: EstimationTotals,
    pub rows_skipped: usize,
}

/// Dispatches usage rows to estimators and rolls the results up by day.
/// Holds no per-run state, so one engine can serve any number of runs.
#[derive(Debug, Clone)]
pub struct FootprintEngine {
    providers: HashMap<CloudProvider, ProviderEstimators>,
}

impl FootprintEngine {
    pub fn new(catalog: &ConstantsCatalog) -> Self {
        let providers = catalog
            .providers()
            .filter_map(|p| catalog.get(p).map(|c| (p, ProviderEstimators::new(c.clone()))))
            .collect();
        Self { providers }
    }

    pub fn built_in() -> Self {
        Self::new(&ConstantsCatalog::built_in())
    }

    /// Estimate for one row, or `None` when the row carries no power
    /// semantics or its provider has no constants.
    pub fn estimate_row(&self, row: &UsageRow) -> Option<FootprintEstimate> {
        let Some(provider) = self.providers.get(&row.cloud_provider) else {
            debug!(provider = %row.cloud_provider, "no constants for provider, skipping row");
            return None;
        };

        let kind = classify(&row.usage_type);
        let Some(estimator) = provider.estimator_for(kind) else {
            debug!(
                usage_type = %row.usage_type,
                service = %row.service_name,
                "usage type has no estimator, skipping row"
            );
            return None;
        };

        let usage = Usage::with_replication(row, provider.replication_factor(row));
        let estimate = estimator.estimate(&usage, &provider.constants);
        if row.region.is_some() && estimate.region == UNKNOWN_REGION {
            debug!(
                region = row.region.as_deref().unwrap_or_default(),
                "unrecognised region, using default emissions factor"
            );
        }
        Some(estimate)
    }

    /// Rows are folded in the order given; reordering them can change the
    /// low bits of the summed totals.
    pub fn estimate(&self, rows: &[UsageRow]) -> Vec<EstimationResult> {
        self.estimate_with_stats(rows).0
    }

    pub fn estimate_with_stats(&self, rows: &[UsageRow]) -> (Vec<EstimationResult>, RunStats) {
        let mut acc = EstimateAccumulator::new();
        let mut stats = RunStats {
            rows: rows.len(),
            ..RunStats::default()
        };

        for row in rows {
            match self.estimate_row(row) {
                Some(estimate) => {
                    acc.append_or_accumulate(estimate);
                    stats.estimated += 1;
                }
                None => stats.skipped += 1,
            }
        }

        info!(
            rows = stats.rows,
            estimated = stats.estimated,
            skipped = stats.skipped,
            days = acc.day_count(),
            "footprint estimation finished"
        );
        (acc.finish(), stats)
    }

    pub fn estimate_with_summary(&self, rows: &[UsageRow]) -> (Vec<EstimationResult>, EstimationSummary) {
        let (results, stats) = self.estimate_with_stats(rows);
        let summary = EstimationSummary {
            totals: totals(&results),
            rows_skipped: stats.skipped,
        };
        (results, summary)
    }
}

pub fn filter_range(rows: Vec<UsageRow>, range: DateRange) -> Vec<UsageRow> {
    rows.into_iter()
        .filter(|row| range.contains(row.day()))
        .collect()
}
