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
            ("n1-standard-1", 1.0),
            ("n1-standard-2", 2.0),
            ("n1-standard-4", 4.0),
            ("n1-standard-8", 8.0),
            ("n1-standard-16", 16.0),
            ("n1-standard-32", 32.0),
            ("n1-standard-64", 64.0),
            ("n1-standard-96", 96.0),
            ("n1-highmem-2", 2.0),
            ("n1-highmem-4", 4.0),
            ("n1-highmem-8", 8.0),
            ("n1-highmem-16", 16.0),
            ("n1-highcpu-2", 2.0),
            ("n1-highcpu-4", 4.0),
            ("n1-highcpu-8", 8.0),
            ("n1-highcpu-16", 16.0),
            ("m1-ultramem-40", 40.0),
            ("m1-megamem-96", 96.0),
        ],
    ));
    machine_types.extend(machines(
        "Cascade Lake",
        &[
            ("n2-standard-2", 2.0),
            ("n2-standard-4", 4.0),
            ("n2-standard-8", 8.0),
            ("n2-standard-16", 16.0),
            ("n2-standard-32", 32.0),
            ("n2-highmem-2", 2.0),
            ("n2-highmem-4", 4.0),
            ("n2-highcpu-8", 8.0),
            ("c2-standard-4", 4.0),
            ("c2-standard-8", 8.0),
            ("c2-standard-16", 16.0),
            ("c2-standard-30", 30.0),
        ],
    ));
    machine_types.extend(machines(
        "EPYC 2nd Gen",
        &[
            ("n2d-standard-2", 2.0),
            ("n2d-standard-4", 4.0),
            ("n2d-standard-8", 8.0),
            ("n2d-standard-16", 16.0),
            ("n2d-highmem-2", 2.0),
            ("n2d-highcpu-8", 8.0),
        ],
    ));
    machine_types.extend(machines(
        "EPYC 3rd Gen",
        &[("t2d-standard-1", 1.0), ("t2d-standard-4", 4.0), ("t2d-standard-8", 8.0)],
    ));
    machine_types.extend(machines(
        "Broadwell",
        &[
            ("e2-micro", 0.25),
            ("e2-small", 0.5),
            ("e2-medium", 1.0),
            ("e2-standard-2", 2.0),
            ("e2-standard-4", 4.0),
            ("e2-standard-8", 8.0),
            ("e2-standard-16", 16.0),
            ("e2-highmem-2", 2.0),
            ("e2-highcpu-4", 4.0),
        ],
    ));
    machine_types.extend(machines("Haswell", &[("f1-micro", 0.2), ("g1-small", 0.5)]));

    ConstantsTable {
        provider: CloudProvider::Gcp,
        pue: 1.1,
        cpu_utilization: DEFAULT_CPU_UTILIZATION,
        average_watts: None,
        compute_families: vec![
            family("Skylake", 0.64, 4.19),
            family("Broadwell", 0.71, 3.69),
            family("Haswell", 1.0, 4.74),
            family("Cascade Lake", 0.64, 3.97),
            family("EPYC 2nd Gen", 0.47, 1.64),
            family("EPYC 3rd Gen", 0.45, 2.02),
            family("Sandy Bridge", 2.17, 8.58),
            family("Ivy Bridge", 3.04, 8.25),
        ],
        machine_types,
        ssd_coefficient: 1.2,
        hdd_coefficient: 0.65,
        networking_coefficient: 0.001,
        memory_coefficient: 0.000392,
        replication_factors: vec![
            rule("Cloud Storage", Some("multi-region"), 6.0),
            rule("Cloud Storage", Some("dual-region"), 4.0),
            rule("Cloud Storage", None, 2.0),
            rule("Compute Engine", Some("regional"), 2.0),
            rule("Cloud Filestore", None, 2.0),
            rule("Cloud SQL", None, 2.0),
            rule("Cloud Memorystore for Redis", None, 2.0),
        ],
        emissions_factors: regions(&[
            ("us-central1", 0.000479),
            ("us-central2", 0.000479),
            ("us-east1", 0.0005),
            ("us-east4", 0.000383),
            ("us-west1", 0.000117),
            ("us-west2", 0.000248),
            ("us-west3", 0.000561),
            ("us-west4", 0.000491),
            ("asia", 0.0006076),
            ("asia-east1", 0.00054),
            ("asia-east2", 0.000453),
            ("asia-northeast1", 0.000524),
            ("asia-northeast2", 0.000505),
            ("asia-northeast3", 0.0005),
            ("asia-south1", 0.000723),
            ("asia-southeast1", 0.000493),
            ("asia-southeast2", 0.000772),
            ("australia-southeast1", 0.000725),
            ("europe", 0.000268),
            ("europe-north1", 0.000211),
            ("europe-west1", 0.000196),
            ("europe-west2", 0.000257),
            ("europe-west3", 0.000319),
            ("europe-west4", 0.000474),
            ("europe-west6", 0.000029),
            ("nam4", 0.0004895),
            ("northamerica-northeast1", 0.000143),
            ("southamerica-east1", 0.000109),
            ("us", 0.00040725),
        ]),
        unknown_region_emissions_factor: 0.00041089,
        billing_units: BillingUnits {
            compute: ComputeUnit::Seconds,
            storage: StorageUnit::ByteSeconds,
            network: NetworkUnit::Bytes,
            memory: MemoryUnit::ByteSeconds,
        },
    }
}
