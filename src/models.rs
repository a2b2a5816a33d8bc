use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region label used on estimates whose region was absent or not present in
/// the provider's emissions table.
pub const UNKNOWN_REGION: &str = "Unknown";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CloudProvider {
    #[serde(rename = "GCP", alias = "gcp")]
    Gcp,
    #[serde(rename = "AWS", alias = "aws")]
    Aws,
    #[serde(rename = "AZURE", alias = "azure", alias = "Azure")]
    Azure,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 3] = [CloudProvider::Gcp, CloudProvider::Aws, CloudProvider::Azure];

    pub fn as_label(self) -> &'static str {
        match self {
            CloudProvider::Gcp => "GCP",
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "AZURE",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gcp" | "google" => Ok(CloudProvider::Gcp),
            "aws" | "amazon" => Ok(CloudProvider::Aws),
            "azure" => Ok(CloudProvider::Azure),
            other => Err(format!("Unsupported cloud provider '{other}'.")),
        }
    }
}

/// One line of a billing export, already decoded by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageRow {
    pub timestamp: DateTime<Utc>,
    pub cloud_provider: CloudProvider,
    pub account_id: String,
    pub account_name: String,
    pub service_name: String,
    pub usage_type: String,
    pub usage_amount: f64,
    #[serde(default)]
    pub machine_type: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub replication_factor: Option<f64>,
}

impl UsageRow {
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FootprintEstimate {
    pub timestamp: NaiveDate,
    pub kilowatt_hours: f64,
    pub co2e: f64,
    #[serde(rename = "usesAverageCPUConstant")]
    pub uses_average_cpu_constant: bool,
    pub cloud_provider: CloudProvider,
    pub account_id: String,
    pub account_name: String,
    pub service_name: String,
    pub cost: f64,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub timestamp: NaiveDate,
    pub service_estimates: Vec<FootprintEstimate>,
}

/// Half-open day range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!(" GCP ".parse::<CloudProvider>(), Ok(CloudProvider::Gcp));
        assert_eq!("Azure".parse::<CloudProvider>(), Ok(CloudProvider::Azure));
        assert!("oracle".parse::<CloudProvider>().is_err());
    }

    #[test]
    fn provider_serializes_as_upper_case_label() {
        let json = serde_json::to_string(&CloudProvider::Aws).expect("serialize");
        assert_eq!(json, "\"AWS\"");
        let parsed: CloudProvider = serde_json::from_str("\"gcp\"").expect("alias parses");
        assert_eq!(parsed, CloudProvider::Gcp);
    }

    #[test]
    fn date_range_is_half_open() {
        let start = NaiveDate::from_ymd_opt(2020, 10, 1).expect("date");
        let end = NaiveDate::from_ymd_opt(2020, 11, 3).expect("date");
        let range = DateRange::new(start, end);
        assert!(range.contains(start));
        assert!(range.contains(NaiveDate::from_ymd_opt(2020, 11, 2).expect("date")));
        assert!(!range.contains(end));
    }

    #[test]
    fn estimate_serializes_with_camel_case_fields() {
        let estimate = FootprintEstimate {
            timestamp: NaiveDate::from_ymd_opt(2020, 11, 2).expect("date"),
            kilowatt_hours: 1.0,
            co2e: 0.5,
            uses_average_cpu_constant: true,
            cloud_provider: CloudProvider::Gcp,
            account_id: "acc".into(),
            account_name: "Account".into(),
            service_name: "Compute Engine".into(),
            cost: 3.0,
            region: "us-east1".into(),
        };
        let value = serde_json::to_value(&estimate).expect("serialize");
        assert_eq!(value["timestamp"], "2020-11-02");
        assert_eq!(value["kilowattHours"], 1.0);
        assert_eq!(value["usesAverageCPUConstant"], true);
        assert_eq!(value["cloudProvider"], "GCP");
    }
}
