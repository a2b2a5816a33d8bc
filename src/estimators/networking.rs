use super::{Energy, FootprintEstimator, Usage};
use crate::constants::{CloudConstants, NetworkUnit};
use crate::units::bytes_to_gigabytes;
use crate::usage_types::is_ingress;

/// Egress-only networking estimator; coefficient in kWh per gigabyte.
#[derive(Debug, Clone, Copy)]
pub struct NetworkingEstimator {
    coefficient: f64,
}

impl NetworkingEstimator {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }

    fn gigabytes(usage: &Usage<'_>, constants: &CloudConstants) -> f64 {
        match constants.billing_units().network {
            NetworkUnit::Bytes => bytes_to_gigabytes(usage.amount()),
            NetworkUnit::Gigabytes => usage.amount(),
        }
    }
}

impl FootprintEstimator for NetworkingEstimator {
    fn energy(&self, usage: &Usage<'_>, constants: &CloudConstants) -> Energy {
        if is_ingress(&usage.row.usage_type) {
            return Energy::default();
        }
        Energy::new(Self::gigabytes(usage, constants) * self.coefficient * constants.pue())
    }
}
