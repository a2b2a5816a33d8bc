//! Provider-scoped power, efficiency and grid-intensity tables.
//!
//! Every provider is described by the same [`ConstantsTable`] shape; the
//! estimators never branch on the provider, they are handed a different
//! table instead.

use crate::config::ConstantsOverride;
use crate::models::{CloudProvider, UNKNOWN_REGION};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub mod aws;
pub mod azure;
pub mod gcp;

pub const DEFAULT_CPU_UTILIZATION: f64 = 50.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComputeUnit {
    Seconds,
    Hours,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageUnit {
    ByteSeconds,
    GigabyteMonths,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NetworkUnit {
    Bytes,
    Gigabytes,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemoryUnit {
    ByteSeconds,
    GigabyteHours,
    GigabyteMonths,
}

/// Units the provider's billing export reports usage amounts in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingUnits {
    pub compute: ComputeUnit,
    pub storage: StorageUnit,
    pub network: NetworkUnit,
    pub memory: MemoryUnit,
}

/// Per-vCPU power envelope of one processor family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputeFamily {
    pub name: String,
    pub min_watts: f64,
    pub max_watts: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineType {
    pub name: String,
    pub family: String,
    pub vcpus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplicationRule {
    pub service: String,
    pub usage_type_contains: Option<String>,
    pub factor: f64,
}

/// Static description of one provider. Coefficient units:
/// storage in watt-hours per terabyte-hour, networking in kWh per gigabyte,
/// memory in kWh per gigabyte-hour, emissions in metric tonnes CO2e per kWh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstantsTable {
    pub provider: CloudProvider,
    pub pue: f64,
    pub cpu_utilization: f64,
    pub average_watts: Option<f64>,
    pub compute_families: Vec<ComputeFamily>,
    pub machine_types: Vec<MachineType>,
    pub ssd_coefficient: f64,
    pub hdd_coefficient: f64,
    pub networking_coefficient: f64,
    pub memory_coefficient: f64,
    pub replication_factors: Vec<ReplicationRule>,
    pub emissions_factors: BTreeMap<String, f64>,
    pub unknown_region_emissions_factor: f64,
    pub billing_units: BillingUnits,
}

/// Resolved wattage for a recognised machine type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineWattage {
    pub watts_per_vcpu: f64,
    pub vcpus: f64,
}

impl MachineWattage {
    pub fn total_watts(&self) -> f64 {
        self.watts_per_vcpu * self.vcpus
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionFactor {
    pub region: String,
    pub factor: f64,
    pub known: bool,
}

/// Read-only view over a [`ConstantsTable`] with lookup indexes and the
/// fallback wattage computed once at construction.
#[derive(Debug, Clone)]
pub struct CloudConstants {
    table: ConstantsTable,
    family_watts: HashMap<String, f64>,
    machine_index: HashMap<String, usize>,
    region_index: HashMap<String, (String, f64)>,
    fallback_watts: f64,
}

impl CloudConstants {
    pub fn new(table: ConstantsTable) -> Self {
        let utilization = table.cpu_utilization.clamp(0.0, 100.0);
        let family_watts: HashMap<String, f64> = table
            .compute_families
            .iter()
            .map(|f| (f.name.to_ascii_lowercase(), average_watts(f, utilization)))
            .collect();

        let machine_index = table
            .machine_types
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.trim().to_ascii_lowercase(), i))
            .collect();

        let region_index = table
            .emissions_factors
            .iter()
            .map(|(region, factor)| {
                let region = region.trim();
                (region.to_ascii_lowercase(), (region.to_string(), *factor))
            })
            .collect();

        let fallback_watts = match table.average_watts {
            Some(watts) if watts.is_finite() && watts >= 0.0 => watts,
            _ => median(family_watts.values().copied().collect()),
        };

        Self {
            table,
            family_watts,
            machine_index,
            region_index,
            fallback_watts,
        }
    }

    pub fn provider(&self) -> CloudProvider {
        self.table.provider
    }

    pub fn table(&self) -> &ConstantsTable {
        &self.table
    }

    pub fn pue(&self) -> f64 {
        self.table.pue
    }

    pub fn ssd_coefficient(&self) -> f64 {
        self.table.ssd_coefficient
    }

    pub fn hdd_coefficient(&self) -> f64 {
        self.table.hdd_coefficient
    }

    pub fn networking_coefficient(&self) -> f64 {
        self.table.networking_coefficient
    }

    pub fn memory_coefficient(&self) -> f64 {
        self.table.memory_coefficient
    }

    pub fn billing_units(&self) -> BillingUnits {
        self.table.billing_units
    }

    /// Per-vCPU watts used when a machine type is not recognised.
    pub fn fallback_watts(&self) -> f64 {
        self.fallback_watts
    }

    pub fn family_watts(&self, family: &str) -> Option<f64> {
        self.family_watts.get(&family.to_ascii_lowercase()).copied()
    }

    pub fn machine_wattage(&self, machine_type: &str) -> Option<MachineWattage> {
        let idx = self
            .machine_index
            .get(&machine_type.trim().to_ascii_lowercase())?;
        let machine = &self.table.machine_types[*idx];
        let watts_per_vcpu = self.family_watts(&machine.family)?;
        Some(MachineWattage {
            watts_per_vcpu,
            vcpus: machine.vcpus,
        })
    }

    /// Known regions are labelled with the table's spelling. Absent or
    /// unrecognised regions get the unknown-region factor and
    /// [`UNKNOWN_REGION`].
    pub fn emissions_factor(&self, region: Option<&str>) -> RegionFactor {
        let known = region
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .and_then(|r| self.region_index.get(&r.to_ascii_lowercase()));

        match known {
            Some((region, factor)) => RegionFactor {
                region: region.clone(),
                factor: *factor,
                known: true,
            },
            None => RegionFactor {
                region: UNKNOWN_REGION.to_string(),
                factor: self.table.unknown_region_emissions_factor,
                known: false,
            },
        }
    }

    pub fn replication_factor(&self, service_name: &str, usage_type: &str) -> f64 {
        let usage_type = usage_type.to_ascii_lowercase();
        self.table
            .replication_factors
            .iter()
            .find(|rule| {
                rule.service.eq_ignore_ascii_case(service_name.trim())
                    && rule
                        .usage_type_contains
                        .as_ref()
                        .map_or(true, |needle| {
                            usage_type.contains(&needle.to_ascii_lowercase())
                        })
            })
            .map(|rule| rule.factor)
            .unwrap_or(1.0)
    }
}

pub(crate) fn family(name: &str, min_watts: f64, max_watts: f64) -> ComputeFamily {
    ComputeFamily {
        name: name.to_string(),
        min_watts,
        max_watts,
    }
}

pub(crate) fn machines(family: &str, names: &[(&str, f64)]) -> Vec<MachineType> {
    names
        .iter()
        .map(|(name, vcpus)| MachineType {
            name: name.to_string(),
            family: family.to_string(),
            vcpus: *vcpus,
        })
        .collect()
}

pub(crate) fn rule(service: &str, usage_type_contains: Option<&str>, factor: f64) -> ReplicationRule {
    ReplicationRule {
        service: service.to_string(),
        usage_type_contains: usage_type_contains.map(ToString::to_string),
        factor,
    }
}

pub(crate) fn regions(factors: &[(&str, f64)]) -> BTreeMap<String, f64> {
    factors
        .iter()
        .map(|(region, factor)| (region.to_string(), *factor))
        .collect()
}

fn average_watts(family: &ComputeFamily, utilization: f64) -> f64 {
    family.min_watts + (utilization / 100.0) * (family.max_watts - family.min_watts)
}

/// Median by numeric order; an even count averages the two middle values.
pub fn median(mut values: Vec<f64>) -> f64 {
    values.retain(|v| v.is_finite());
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

pub fn built_in_tables() -> Vec<ConstantsTable> {
    vec![gcp::table(), aws::table(), azure::table()]
}

/// Constants for every configured provider, built once before estimation.
#[derive(Debug, Clone)]
pub struct ConstantsCatalog {
    tables: HashMap<CloudProvider, CloudConstants>,
}

impl ConstantsCatalog {
    pub fn from_tables(tables: Vec<ConstantsTable>) -> Self {
        let tables = tables
            .into_iter()
            .map(|t| (t.provider, CloudConstants::new(t)))
            .collect();
        Self { tables }
    }

    pub fn built_in() -> Self {
        Self::from_tables(built_in_tables())
    }

    pub fn with_overrides(overrides: &[ConstantsOverride], cpu_utilization: Option<f64>) -> Self {
        let tables = built_in_tables()
            .into_iter()
            .map(|mut table| {
                if let Some(util) = cpu_utilization {
                    table.cpu_utilization = util;
                }
                let provider = table.provider;
                for ov in overrides
                    .iter()
                    .filter(|ov| ov.provider.parse::<CloudProvider>() == Ok(provider))
                {
                    apply_override(&mut table, ov);
                }
                table
            })
            .collect();
        Self::from_tables(tables)
    }

    pub fn get(&self, provider: CloudProvider) -> Option<&CloudConstants> {
        self.tables.get(&provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = CloudProvider> + '_ {
        self.tables.keys().copied()
    }
}

fn apply_override(table: &mut ConstantsTable, ov: &ConstantsOverride) {
    if let Some(pue) = ov.pue {
        table.pue = pue;
    }
    if let Some(watts) = ov.average_watts {
        table.average_watts = Some(watts);
    }
    if let Some(c) = ov.ssd_coefficient {
        table.ssd_coefficient = c;
    }
    if let Some(c) = ov.hdd_coefficient {
        table.hdd_coefficient = c;
    }
    if let Some(c) = ov.networking_coefficient {
        table.networking_coefficient = c;
    }
    if let Some(c) = ov.memory_coefficient {
        table.memory_coefficient = c;
    }
    if let Some(f) = ov.unknown_region_emissions_factor {
        table.unknown_region_emissions_factor = f;
    }
    for (region, factor) in &ov.region_emissions_factors {
        let key = region.trim().to_string();
        // Replace any existing spelling of the same region.
        table
            .emissions_factors
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        table.emissions_factors.insert(key, *factor);
    }
}
