use crate::constants::ConstantsCatalog;
use crate::error::AppError;
use crate::models::CloudProvider;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "cloud-footprint";

pub fn normalize_provider_name(provider: &str) -> String {
    provider.trim().to_ascii_lowercase()
}

fn app_home_dir() -> Result<PathBuf, AppError> {
    if let Ok(custom) = std::env::var("CLOUD_FOOTPRINT_HOME") {
        return Ok(PathBuf::from(custom));
    }

    if let Some(dirs) = ProjectDirs::from("org", "cloud-footprint", APP_NAME) {
        let candidate = dirs.data_local_dir().to_path_buf();
        if fs::create_dir_all(&candidate).is_ok() {
            return Ok(candidate);
        }
    }

    let cwd = std::env::current_dir()?;
    Ok(cwd.join(".cloud-footprint"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_provider_name")]
    pub default_provider: String,
    #[serde(default)]
    pub cpu_utilization: Option<f64>,
    #[serde(default)]
    pub constants_overrides: Vec<ConstantsOverride>,
}

fn default_provider_name() -> String {
    "gcp".into()
}

/// Per-provider replacements for built-in constants. Unset fields keep the
/// built-in value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConstantsOverride {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssd_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdd_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_region_emissions_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub region_emissions_factors: HashMap<String, f64>,
}

impl ConstantsOverride {
    /// Later values win field by field.
    fn merge(&mut self, later: ConstantsOverride) {
        self.pue = later.pue.or(self.pue);
        self.average_watts = later.average_watts.or(self.average_watts);
        self.ssd_coefficient = later.ssd_coefficient.or(self.ssd_coefficient);
        self.hdd_coefficient = later.hdd_coefficient.or(self.hdd_coefficient);
        self.networking_coefficient = later.networking_coefficient.or(self.networking_coefficient);
        self.memory_coefficient = later.memory_coefficient.or(self.memory_coefficient);
        self.unknown_region_emissions_factor = later
            .unknown_region_emissions_factor
            .or(self.unknown_region_emissions_factor);
        self.region_emissions_factors
            .extend(later.region_emissions_factors);
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider_name(),
            cpu_utilization: None,
            constants_overrides: vec![],
        }
    }
}

impl AppConfig {
    pub fn default_provider(&self) -> Result<CloudProvider, AppError> {
        self.default_provider
            .parse::<CloudProvider>()
            .map_err(AppError::Config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.default_provider()?;
        if let Some(util) = self.cpu_utilization {
            if !(0.0..=100.0).contains(&util) {
                return Err(AppError::Config(format!(
                    "cpu_utilization must be between 0 and 100, got {util}."
                )));
            }
        }
        for ov in &self.constants_overrides {
            ov.provider
                .parse::<CloudProvider>()
                .map_err(AppError::Config)?;
        }
        Ok(())
    }

    /// Built-in tables with this configuration's overrides applied.
    pub fn constants_catalog(&self) -> ConstantsCatalog {
        ConstantsCatalog::with_overrides(&self.constants_overrides, self.cpu_utilization)
    }
}

pub fn config_dir() -> Result<PathBuf, AppError> {
    Ok(app_home_dir()?.join("config"))
}

pub fn config_path() -> Result<PathBuf, AppError> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn ensure_dirs() -> Result<(), AppError> {
    fs::create_dir_all(config_dir()?)?;
    Ok(())
}

fn normalize_config(config: &mut AppConfig) -> bool {
    let mut changed = false;

    let provider = normalize_provider_name(&config.default_provider);
    if provider != config.default_provider {
        config.default_provider = provider;
        changed = true;
    }

    let mut merged: Vec<ConstantsOverride> = Vec::new();
    for mut ov in std::mem::take(&mut config.constants_overrides) {
        let normalized = normalize_provider_name(&ov.provider);
        if normalized != ov.provider {
            ov.provider = normalized;
            changed = true;
        }
        match merged.iter_mut().find(|m| m.provider == ov.provider) {
            Some(existing) => {
                existing.merge(ov);
                changed = true;
            }
            None => merged.push(ov),
        }
    }
    config.constants_overrides = merged;

    changed
}

pub fn load_config() -> Result<AppConfig, AppError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&path)?;
    let mut parsed: AppConfig = toml::from_str(&raw)?;

    // Persist the normalised form so later loads are stable.
    if normalize_config(&mut parsed) {
        save_config(&parsed)?;
    }
    parsed.validate()?;

    Ok(parsed)
}

pub fn save_config(config: &AppConfig) -> Result<(), AppError> {
    ensure_dirs()?;
    let path = config_path()?;
    let raw = toml::to_string_pretty(config)?;
    fs::write(path, raw)?;
    Ok(())
}

pub fn ensure_initialized() -> Result<(), AppError> {
    ensure_dirs()?;
    let cfg_path = config_path()?;
    if !Path::new(&cfg_path).exists() {
        save_config(&AppConfig::default())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_provider_name_trims_and_lowercases() {
        assert_eq!(normalize_provider_name(" GCP "), "gcp");
        assert_eq!(normalize_provider_name("AzUrE"), "azure");
    }

    #[test]
    fn normalize_config_merges_duplicate_overrides() {
        let mut cfg = AppConfig {
            default_provider: " AWS ".into(),
            cpu_utilization: None,
            constants_overrides: vec![
                ConstantsOverride {
                    provider: "GCP".into(),
                    pue: Some(1.2),
                    ssd_coefficient: Some(1.0),
                    ..Default::default()
                },
                ConstantsOverride {
                    provider: "gcp".into(),
                    pue: Some(1.3),
                    region_emissions_factors: HashMap::from([("us-east1".to_string(), 0.1)]),
                    ..Default::default()
                },
            ],
        };

        assert!(normalize_config(&mut cfg));
        assert_eq!(cfg.default_provider, "aws");
        assert_eq!(cfg.constants_overrides.len(), 1);
        let merged = &cfg.constants_overrides[0];
        assert_eq!(merged.pue, Some(1.3));
        assert_eq!(merged.ssd_coefficient, Some(1.0));
        assert_eq!(merged.region_emissions_factors.get("us-east1"), Some(&0.1));
    }

    #[test]
    fn validate_rejects_unknown_provider_and_bad_utilization() {
        let cfg = AppConfig {
            default_provider: "oracle".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = AppConfig {
            cpu_utilization: Some(120.0),
            ..Default::default()
        };
        let err = cfg.validate().expect_err("utilization out of range");
        assert!(err.to_string().contains("cpu_utilization"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = AppConfig {
            default_provider: "gcp".into(),
            cpu_utilization: Some(35.0),
            constants_overrides: vec![ConstantsOverride {
                provider: "aws".into(),
                pue: Some(1.2),
                ..Default::default()
            }],
        };
        let raw = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: AppConfig = toml::from_str(&raw).expect("parse");
        assert_eq!(parsed.cpu_utilization, Some(35.0));
        assert_eq!(parsed.constants_overrides, cfg.constants_overrides);
    }

    #[test]
    fn catalog_applies_configured_overrides() {
        let cfg = AppConfig {
            constants_overrides: vec![ConstantsOverride {
                provider: "azure".into(),
                pue: Some(1.4),
                ..Default::default()
            }],
            ..Default::default()
        };
        let catalog = cfg.constants_catalog();
        let azure = catalog.get(CloudProvider::Azure).expect("azure table");
        assert_eq!(azure.pue(), 1.4);
    }
}
