//! Per-resource energy estimators.
//!
//! Each estimator turns one usage row into kilowatt-hours; the shared
//! [`FootprintEstimator::estimate`] step applies the regional emissions
//! factor and builds the output record.

use crate::constants::CloudConstants;
use crate::models::{FootprintEstimate, UsageRow};

pub mod compute;
pub mod memory;
pub mod networking;
pub mod storage;

pub use compute::ComputeEstimator;
pub use memory::MemoryEstimator;
pub use networking::NetworkingEstimator;
pub use storage::StorageEstimator;

/// A row together with the replication factor resolved for it.
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    pub row: &'a UsageRow,
    pub replication_factor: f64,
}

impl<'a> Usage<'a> {
    pub fn new(row: &'a UsageRow) -> Self {
        Self {
            row,
            replication_factor: 1.0,
        }
    }

    pub fn with_replication(row: &'a UsageRow, replication_factor: f64) -> Self {
        Self {
            row,
            replication_factor: sanitize_replication(replication_factor),
        }
    }

    /// Usage amount with degenerate values (NaN, infinities, negatives) read as zero.
    pub fn amount(&self) -> f64 {
        non_negative(self.row.usage_amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Energy {
    pub kilowatt_hours: f64,
    pub uses_average_cpu_constant: bool,
}

impl Energy {
    pub fn new(kilowatt_hours: f64) -> Self {
        Self {
            kilowatt_hours: non_negative(kilowatt_hours),
            uses_average_cpu_constant: false,
        }
    }
}

pub trait FootprintEstimator {
    fn energy(&self, usage: &Usage<'_>, constants: &CloudConstants) -> Energy;

    fn estimate(&self, usage: &Usage<'_>, constants: &CloudConstants) -> FootprintEstimate {
        let energy = self.energy(usage, constants);
        let region = constants.emissions_factor(usage.row.region.as_deref());
        let row = usage.row;
        FootprintEstimate {
            timestamp: row.day(),
            kilowatt_hours: energy.kilowatt_hours,
            co2e: estimate_co2e(energy.kilowatt_hours, region.factor),
            uses_average_cpu_constant: energy.uses_average_cpu_constant,
            cloud_provider: row.cloud_provider,
            account_id: row.account_id.clone(),
            account_name: row.account_name.clone(),
            service_name: row.service_name.clone(),
            cost: row.cost,
            region: region.region,
        }
    }
}

pub fn estimate_co2e(kilowatt_hours: f64, emissions_factor: f64) -> f64 {
    non_negative(kilowatt_hours * emissions_factor)
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub(crate) fn sanitize_replication(factor: f64) -> f64 {
    if factor.is_finite() && factor >= 1.0 {
        factor
    } else {
        1.0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{CloudProvider, UsageRow};
    use chrono::{TimeZone, Utc};

    pub fn row(usage_type: &str, amount: f64) -> UsageRow {
        UsageRow {
            timestamp: Utc
                .with_ymd_and_hms(2020, 11, 2, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
            cloud_provider: CloudProvider::Gcp,
            account_id: "test-account-id".into(),
            account_name: "test-account-name".into(),
            service_name: "Compute Engine".into(),
            usage_type: usage_type.into(),
            usage_amount: amount,
            machine_type: None,
            region: Some("us-east1".into()),
            cost: 5.0,
            replication_factor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::row;
    use super::*;
    use crate::constants::gcp;
    use crate::models::UNKNOWN_REGION;

    struct FixedEnergy(f64);

    impl FootprintEstimator for FixedEnergy {
        fn energy(&self, _usage: &Usage<'_>, _constants: &CloudConstants) -> Energy {
            Energy::new(self.0)
        }
    }

    #[test]
    fn estimate_applies_region_factor_and_echoes_row() {
        let constants = CloudConstants::new(gcp::table());
        let r = row("Storage", 1.0);
        let estimate = FixedEnergy(2.0).estimate(&Usage::new(&r), &constants);
        assert_eq!(estimate.kilowatt_hours, 2.0);
        assert!((estimate.co2e - 2.0 * 0.0005).abs() < 1e-15);
        assert_eq!(estimate.region, "us-east1");
        assert_eq!(estimate.cost, 5.0);
        assert_eq!(estimate.account_id, "test-account-id");
        assert_eq!(estimate.timestamp, r.day());
    }

    #[test]
    fn missing_region_is_labelled_unknown() {
        let constants = CloudConstants::new(gcp::table());
        let mut r = row("Storage", 1.0);
        r.region = None;
        let estimate = FixedEnergy(1.0).estimate(&Usage::new(&r), &constants);
        assert_eq!(estimate.region, UNKNOWN_REGION);
        assert_eq!(
            estimate.co2e,
            constants.table().unknown_region_emissions_factor
        );
    }

    #[test]
    fn degenerate_values_are_clamped_to_zero() {
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
        assert_eq!(estimate_co2e(-1.0, 0.5), 0.0);
        assert_eq!(sanitize_replication(0.0), 1.0);
        assert_eq!(sanitize_replication(f64::NAN), 1.0);
        assert_eq!(sanitize_replication(3.0), 3.0);
    }
}
