//! Maps billing usage-type strings onto the resource kinds we can estimate.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageClass {
    Ssd,
    Hdd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    Compute,
    Storage(StorageClass),
    Networking,
    Memory,
    /// No power semantics (fees, requests, ingress): dropped without error.
    Unsupported,
}

const INGRESS: &[&str] = &["ingress"];

/// Matched only as whole words so "Data Transfer Inter-Region" stays egress.
const INGRESS_WORDS: &[&str] = &["datatransfer-in", "data transfer in"];

const UNSUPPORTED: &[&str] = &[
    "commitment",
    "licensing fee",
    "license",
    "support",
    "tax",
    "requests",
    "operations",
    "api calls",
    "domain",
    "ip address",
    "subscription",
];

const NETWORKING: &[&str] = &[
    "egress",
    "network",
    "data transfer",
    "datatransfer",
    "download",
    "inter-zone",
    "inter-region",
];

const MEMORY: &[&str] = &["memory", "redis capacity"];

const MEMORY_WORDS: &[&str] = &["ram"];

const SSD: &[&str] = &["ssd", "volumeusage.gp", "volumeusage.io"];

const HDD: &[&str] = &[
    "storage",
    "pd capacity",
    "capacity",
    "backup",
    "snapshot",
    "volumeusage",
];

const COMPUTE: &[&str] = &["vcpu", "core", "cpu", "instance", "compute", "boxusage"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// True when `needle` occurs with no letter or digit directly on either side.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}

fn contains_any_word(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| contains_word(haystack, needle))
}

fn ingress(usage_type: &str) -> bool {
    contains_any(usage_type, INGRESS) || contains_any_word(usage_type, INGRESS_WORDS)
}

pub fn is_ingress(usage_type: &str) -> bool {
    ingress(&usage_type.to_ascii_lowercase())
}

/// First matching rule wins, so a "SSD backed PD Capacity" row is SSD and
/// "Network Internet Ingress" is never networking.
pub fn classify(usage_type: &str) -> UsageKind {
    let usage_type = usage_type.to_ascii_lowercase();

    if ingress(&usage_type) || contains_any(&usage_type, UNSUPPORTED) {
        UsageKind::Unsupported
    } else if contains_any(&usage_type, NETWORKING) {
        UsageKind::Networking
    } else if contains_any(&usage_type, MEMORY) || contains_any_word(&usage_type, MEMORY_WORDS) {
        UsageKind::Memory
    } else if contains_any(&usage_type, SSD) {
        UsageKind::Storage(StorageClass::Ssd)
    } else if contains_any(&usage_type, HDD) {
        UsageKind::Storage(StorageClass::Hdd)
    } else if contains_any(&usage_type, COMPUTE) {
        UsageKind::Compute
    } else {
        UsageKind::Unsupported
    }
}
