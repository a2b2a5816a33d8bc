use super::{
    family, machines, regions, rule, BillingUnits, ComputeUnit, ConstantsTable, MemoryUnit,
    NetworkUnit, StorageUnit, DEFAULT_CPU_UTILIZATION,
};
use crate::models::CloudProvider;

pub fn table() -> ConstantsTable {
    let mut machine_types = Vec::new();
    machine_types.extend(machines(
        "Skylake",
        &[
            ("m5.large", 2.0),
            ("m5.xlarge", 4.0),
            ("m5.2xlarge", 8.0),
            ("m5.4xlarge", 16.0),
            ("r5.large", 2.0),
            ("r5.xlarge", 4.0),
            ("r5.2xlarge", 8.0),
            ("t3.micro", 2.0),
            ("t3.small", 2.0),
            ("t3.medium", 2.0),
            ("t3.large", 2.0),
        ],
    ));
    machine_types.extend(machines(
        "Cascade Lake",
        &[
            ("c5.large", 2.0),
            ("c5.xlarge", 4.0),
            ("c5.2xlarge", 8.0),
            ("c5.4xlarge", 16.0),
            ("m5n.large", 2.0),
        ],
    ));
    machine_types.extend(machines(
        "Broadwell",
        &[("m4.large", 2.0), ("m4.xlarge", 4.0), ("t2.micro", 1.0), ("t2.medium", 2.0)],
    ));
    machine_types.extend(machines(
        "EPYC 2nd Gen",
        &[("c5a.large", 2.0), ("c5a.xlarge", 4.0), ("m5a.large", 2.0), ("t3a.medium", 2.0)],
    ));
    machine_types.extend(machines(
        "Graviton2",
        &[
            ("m6g.medium", 1.0),
            ("m6g.large", 2.0),
            ("m6g.xlarge", 4.0),
            ("c6g.large", 2.0),
            ("t4g.micro", 2.0),
        ],
    ));

    ConstantsTable {
        provider: CloudProvider::Aws,
        pue: 1.135,
        cpu_utilization: DEFAULT_CPU_UTILIZATION,
        average_watts: None,
        compute_families: vec![
            family("Skylake", 0.64, 4.19),
            family("Broadwell", 0.71, 3.69),
            family("Haswell", 1.0, 4.74),
            family("Cascade Lake", 0.64, 3.97),
            family("EPYC 2nd Gen", 0.47, 1.64),
            family("Graviton2", 0.47, 1.69),
        ],
        machine_types,
        ssd_coefficient: 1.2,
        hdd_coefficient: 0.65,
        networking_coefficient: 0.001,
        memory_coefficient: 0.000392,
        replication_factors: vec![
            rule("Amazon Simple Storage Service", None, 3.0),
            rule("Amazon Elastic Block Store", None, 2.0),
            rule("Amazon Elastic File System", None, 3.0),
            rule("Amazon Relational Database Service", Some("storage"), 2.0),
            rule("Amazon DocumentDB", Some("storage"), 6.0),
        ],
        emissions_factors: regions(&[
            ("us-east-1", 0.000415755),
            ("us-east-2", 0.000440187),
            ("us-west-1", 0.000350861),
            ("us-west-2", 0.000350861),
            ("us-gov-west-1", 0.000350861),
            ("ca-central-1", 0.00013),
            ("eu-west-1", 0.0002786),
            ("eu-west-2", 0.000225),
            ("eu-west-3", 0.0000511),
            ("eu-central-1", 0.000338),
            ("eu-north-1", 0.0000088),
            ("ap-south-1", 0.000708),
            ("ap-southeast-1", 0.0004085),
            ("ap-southeast-2", 0.00079),
            ("ap-northeast-1", 0.000506),
            ("ap-northeast-2", 0.0005),
            ("sa-east-1", 0.0000617),
        ]),
        unknown_region_emissions_factor: 0.0003702,
        billing_units: BillingUnits {
            compute: ComputeUnit::Hours,
            storage: StorageUnit::GigabyteMonths,
            network: NetworkUnit::Gigabytes,
            memory: MemoryUnit::GigabyteHours,
        },
    }
}
