use super::BillingExport;
use crate::engine::filter_range;
use crate::error::BillingExportError;
use crate::models::{CloudProvider, DateRange, UsageRow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Billing export rows stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileExport {
    path: PathBuf,
    default_provider: CloudProvider,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow {
    #[serde(deserialize_with = "deserialize_day_or_timestamp")]
    timestamp: DateTime<Utc>,
    #[serde(default)]
    cloud_provider: Option<CloudProvider>,
    account_id: String,
    #[serde(default)]
    account_name: Option<String>,
    service_name: String,
    usage_type: String,
    usage_amount: f64,
    #[serde(default)]
    machine_type: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    cost: f64,
    #[serde(default)]
    replication_factor: Option<f64>,
}

impl ExportRow {
    fn into_usage_row(self, default_provider: CloudProvider) -> UsageRow {
        UsageRow {
            timestamp: self.timestamp,
            cloud_provider: self.cloud_provider.unwrap_or(default_provider),
            account_name: self.account_name.unwrap_or_else(|| self.account_id.clone()),
            account_id: self.account_id,
            service_name: self.service_name,
            usage_type: self.usage_type,
            usage_amount: self.usage_amount,
            machine_type: self.machine_type.filter(|m| !m.trim().is_empty()),
            region: self.region.filter(|r| !r.trim().is_empty()),
            cost: self.cost,
            replication_factor: self.replication_factor,
        }
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` days.
fn deserialize_day_or_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day_or_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid timestamp '{raw}'"))
    })
}

fn parse_day_or_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl JsonFileExport {
    pub fn new(path: impl Into<PathBuf>, default_provider: CloudProvider) -> Self {
        Self {
            path: path.into(),
            default_provider,
        }
    }

    fn parse(&self, raw: &str) -> Result<Vec<UsageRow>, BillingExportError> {
        let rows: Vec<ExportRow> =
            serde_json::from_str(raw).map_err(|e| BillingExportError::ResultRetrieval {
                reason: "invalid".into(),
                domain: "json".into(),
                message: e.to_string(),
            })?;
        Ok(rows
            .into_iter()
            .map(|r| r.into_usage_row(self.default_provider))
            .collect())
    }
}

#[async_trait]
impl BillingExport for JsonFileExport {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch_rows(&self, range: DateRange) -> Result<Vec<UsageRow>, BillingExportError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            BillingExportError::QuerySubmission {
                reason: match e.kind() {
                    std::io::ErrorKind::NotFound => "notFound".into(),
                    _ => "unreadable".into(),
                },
                location: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let rows = self.parse(&raw)?;
        let total = rows.len();
        let rows = filter_range(rows, range);
        debug!(
            source = self.name(),
            total,
            in_range = rows.len(),
            "loaded billing export rows"
        );
        Ok(rows)
    }
}
