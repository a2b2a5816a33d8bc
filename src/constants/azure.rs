use super::{
    family, machines, regions, rule, BillingUnits, ComputeUnit, ConstantsTable, MemoryUnit,
    NetworkUnit, StorageUnit, DEFAULT_CPU_UTILIZATION,
};
use crate::models::CloudProvider;

pub fn table() -> ConstantsTable {
    let mut machine_types = Vec::new();
    machine_types.extend(machines(
        "Broadwell",
        &[
            ("Standard_D2_v3", 2.0),
            ("Standard_D4_v3", 4.0),
            ("Standard_D8_v3", 8.0),
            ("Standard_E2_v3", 2.0),
            ("Standard_E4_v3", 4.0),
        ],
    ));
    machine_types.extend(machines(
        "Cascade Lake",
        &[
            ("Standard_D2s_v4", 2.0),
            ("Standard_D4s_v4", 4.0),
            ("Standard_D8s_v4", 8.0),
            ("Standard_E2s_v4", 2.0),
            ("Standard_F2s_v2", 2.0),
            ("Standard_F4s_v2", 4.0),
        ],
    ));
    machine_types.extend(machines(
        "Skylake",
        &[("Standard_B1s", 1.0), ("Standard_B2s", 2.0), ("Standard_B2ms", 2.0), ("Standard_B4ms", 4.0)],
    ));
    machine_types.extend(machines(
        "EPYC 2nd Gen",
        &[("Standard_D2as_v4", 2.0), ("Standard_D4as_v4", 4.0), ("Standard_E4as_v4", 4.0)],
    ));

    ConstantsTable {
        provider: CloudProvider::Azure,
        pue: 1.185,
        cpu_utilization: DEFAULT_CPU_UTILIZATION,
        average_watts: None,
        compute_families: vec![
            family("Skylake", 0.64, 4.19),
            family("Broadwell", 0.71, 3.69),
            family("Haswell", 1.0, 4.74),
            family("Cascade Lake", 0.64, 3.97),
            family("EPYC 2nd Gen", 0.47, 1.64),
            family("EPYC 1st Gen", 0.82, 2.55),
        ],
        machine_types,
        ssd_coefficient: 1.2,
        hdd_coefficient: 0.65,
        networking_coefficient: 0.001,
        memory_coefficient: 0.000392,
        replication_factors: vec![
            rule("Storage", None, 3.0),
            rule("Managed Disks", None, 3.0),
            rule("Azure Database for MySQL", Some("storage"), 3.0),
            rule("SQL Database", Some("storage"), 3.0),
        ],
        emissions_factors: regions(&[
            ("centralus", 0.000426254),
            ("eastus", 0.000415755),
            ("eastus2", 0.000415755),
            ("westus", 0.000350861),
            ("westus2", 0.000350861),
            ("northcentralus", 0.000426254),
            ("southcentralus", 0.000424348),
            ("canadacentral", 0.00013),
            ("northeurope", 0.0002786),
            ("westeurope", 0.00039),
            ("uksouth", 0.000225),
            ("francecentral", 0.0000511),
            ("germanywestcentral", 0.000338),
            ("japaneast", 0.000506),
            ("southeastasia", 0.0004085),
            ("australiaeast", 0.00079),
            ("centralindia", 0.000708),
            ("brazilsouth", 0.0000617),
        ]),
        unknown_region_emissions_factor: 0.0003586,
        billing_units: BillingUnits {
            compute: ComputeUnit::Hours,
            storage: StorageUnit::GigabyteMonths,
            network: NetworkUnit::Gigabytes,
            memory: MemoryUnit::GigabyteMonths,
        },
    }
}
