use super::{Energy, FootprintEstimator, Usage};
use crate::constants::{CloudConstants, ComputeUnit};
use crate::units::seconds_to_hours;
use tracing::debug;

/// Known machine types bill instance time and draw per-vCPU watts times
/// their vCPU count. Anything else is read as vCPU time at the provider's
/// fallback wattage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeEstimator;

impl ComputeEstimator {
    pub fn new() -> Self {
        Self
    }

    fn hours(usage: &Usage<'_>, constants: &CloudConstants) -> f64 {
        match constants.billing_units().compute {
            ComputeUnit::Seconds => seconds_to_hours(usage.amount()),
            ComputeUnit::Hours => usage.amount(),
        }
    }
}

impl FootprintEstimator for ComputeEstimator {
    fn energy(&self, usage: &Usage<'_>, constants: &CloudConstants) -> Energy {
        let hours = Self::hours(usage, constants);
        let machine = usage
            .row
            .machine_type
            .as_deref()
            .and_then(|m| constants.machine_wattage(m));

        let (watts, uses_average_cpu_constant) = match machine {
            Some(machine) => (machine.total_watts(), false),
            None => {
                debug!(
                    machine_type = usage.row.machine_type.as_deref().unwrap_or("none"),
                    provider = %constants.provider(),
                    "unrecognised machine type, using fallback wattage"
                );
                (constants.fallback_watts(), true)
            }
        };

        Energy {
            uses_average_cpu_constant,
            ..Energy::new(watts * constants.pue() * hours / 1000.0)
        }
    }
}
