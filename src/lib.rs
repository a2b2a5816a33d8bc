pub mod aggregation;
pub mod billing;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod estimators;
pub mod models;
pub mod units;
pub mod usage_types;
