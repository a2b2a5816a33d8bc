//! Seam to the billing-export collaborator that supplies usage rows.

use crate::error::BillingExportError;
use crate::models::{DateRange, UsageRow};
use async_trait::async_trait;

pub mod file;

pub use file::JsonFileExport;

#[async_trait]
pub trait BillingExport {
    fn name(&self) -> &str;

    /// All rows for `range`, fully materialised. Errors are returned as-is
    /// to the caller; the engine never retries.
    async fn fetch_rows(&self, range: DateRange) -> Result<Vec<UsageRow>, BillingExportError>;
}
