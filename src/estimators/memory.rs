use super::{Energy, FootprintEstimator, Usage};
use crate::constants::{CloudConstants, MemoryUnit};
use crate::units::{byte_seconds_to_gigabyte_hours, gigabyte_months_to_gigabyte_hours};

/// Memory estimator; coefficient in kWh per gigabyte-hour.
#[derive(Debug, Clone, Copy)]
pub struct MemoryEstimator {
    coefficient: f64,
}

impl MemoryEstimator {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }

    fn gigabyte_hours(usage: &Usage<'_>, constants: &CloudConstants) -> f64 {
        match constants.billing_units().memory {
            MemoryUnit::ByteSeconds => byte_seconds_to_gigabyte_hours(usage.amount()),
            MemoryUnit::GigabyteHours => usage.amount(),
            MemoryUnit::GigabyteMonths => {
                gigabyte_months_to_gigabyte_hours(usage.amount(), usage.row.timestamp)
            }
        }
    }
}

impl FootprintEstimator for MemoryEstimator {
    fn energy(&self, usage: &Usage<'_>, constants: &CloudConstants) -> Energy {
        Energy::new(
            Self::gigabyte_hours(usage, constants)
                * self.coefficient
                * constants.pue()
                * usage.replication_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{aws, azure, gcp};
    use crate::estimators::test_support::row;

    #[test]
    fn byte_seconds_convert_through_gigabyte_hours() {
        let constants = CloudConstants::new(gcp::table());
        let one_gib_hour = 1_073_741_824.0 * 3600.0;
        let r = row("N1 Predefined Instance Ram", 4.0 * one_gib_hour);
        let energy = MemoryEstimator::new(0.000392).energy(&Usage::new(&r), &constants);
        assert!((energy.kilowatt_hours - 4.0 * 0.000392 * 1.1).abs() < 1e-15);
    }

    #[test]
    fn replication_multiplies_memory_energy() {
        let constants = CloudConstants::new(aws::table());
        let r = row("Memory GB-Hours", 10.0);
        let estimator = MemoryEstimator::new(0.000392);
        let single = estimator.energy(&Usage::new(&r), &constants);
        let doubled = estimator.energy(&Usage::with_replication(&r, 2.0), &constants);
        assert!((doubled.kilowatt_hours - 2.0 * single.kilowatt_hours).abs() < 1e-15);
    }

    #[test]
    fn gigabyte_months_use_month_length() {
        let constants = CloudConstants::new(azure::table());
        // November 2020 has 30 days.
        let r = row("Cache Memory", 1.0);
        let energy = MemoryEstimator::new(0.000392).energy(&Usage::new(&r), &constants);
        assert!((energy.kilowatt_hours - 720.0 * 0.000392 * 1.185).abs() < 1e-12);
    }

    #[test]
    fn zero_and_degenerate_amounts_yield_zero() {
        for table in [gcp::table(), aws::table(), azure::table()] {
            let constants = CloudConstants::new(table);
            for amount in [0.0, -5.0, f64::NAN] {
                let r = row("N1 Predefined Instance Ram", amount);
                let usage = Usage::with_replication(&r, 2.0);
                let estimate = MemoryEstimator::new(0.000392).estimate(&usage, &constants);
                assert_eq!(estimate.kilowatt_hours, 0.0);
                assert_eq!(estimate.co2e, 0.0);
            }
        }
    }
}
