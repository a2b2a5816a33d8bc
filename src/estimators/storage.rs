use super::{Energy, FootprintEstimator, Usage};
use crate::constants::{CloudConstants, StorageUnit};
use crate::units::{byte_seconds_to_terabyte_hours, gigabyte_months_to_terabyte_hours};

/// Estimator for a single storage class. The coefficient is in watt-hours
/// per terabyte-hour.
#[derive(Debug, Clone, Copy)]
pub struct StorageEstimator {
    coefficient: f64,
}

impl StorageEstimator {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn terabyte_hours(usage: &Usage<'_>, constants: &CloudConstants) -> f64 {
        match constants.billing_units().storage {
            StorageUnit::ByteSeconds => byte_seconds_to_terabyte_hours(usage.amount()),
            StorageUnit::GigabyteMonths => {
                gigabyte_months_to_terabyte_hours(usage.amount(), usage.row.timestamp)
            }
        }
    }
}

impl FootprintEstimator for StorageEstimator {
    fn energy(&self, usage: &Usage<'_>, constants: &CloudConstants) -> Energy {
        let terabyte_hours = Self::terabyte_hours(usage, constants);
        // Every replica is powered independently.
        Energy::new(
            terabyte_hours * self.coefficient * constants.pue() * usage.replication_factor
                / 1000.0,
        )
    }
}
