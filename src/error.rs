use thiserror::Error;

/// Failures raised by the billing-export collaborator. The engine never
/// produces these; they pass through to the caller unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BillingExportError {
    #[error(
        "Billing export create query job failed. Reason: {reason}, Location: {location}, Message: {message}"
    )]
    QuerySubmission {
        reason: String,
        location: String,
        message: String,
    },

    #[error(
        "Billing export get query results failed. Reason: {reason}, Domain: {domain}, Message: {message}"
    )]
    ResultRetrieval {
        reason: String,
        domain: String,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error(transparent)]
    Billing(#[from] BillingExportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
