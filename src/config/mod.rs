use crate::cache::DEFAULT_TTL_MS;
use crate::errors::{AppError, AppResult};
use crate::models::pay_item::{PayItem, PayItemLookup};
use crate::models::rate_type::RateType;
use crate::models::staff::{StaffRecord, StaffResolver};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys every config file is expected to carry.
pub const REQUIRED_KEYS: &[&str] = &[
    "database",
    "cache_ttl_ms",
    "default_rate",
    "pay_items",
    "staff",
    "current_staff",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayItemConfig {
    pub multiplier: f64,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: i64,
    /// Rate label for timesheet rows that carry none.
    #[serde(default)]
    pub default_rate: RateType,
    #[serde(default = "default_pay_items")]
    pub pay_items: Vec<PayItemConfig>,
    #[serde(default)]
    pub staff: Vec<StaffRecord>,
    #[serde(default)]
    pub current_staff: Option<String>,
}

fn default_cache_ttl_ms() -> i64 {
    DEFAULT_TTL_MS
}

fn default_pay_items() -> Vec<PayItemConfig> {
    vec![
        PayItemConfig {
            multiplier: 1.5,
            id: "overtime-1.5".to_string(),
            name: "Time and one half".to_string(),
        },
        PayItemConfig {
            multiplier: 2.0,
            id: "overtime-2.0".to_string(),
            name: "Double time".to_string(),
        },
        PayItemConfig {
            multiplier: 0.0,
            id: "unpaid".to_string(),
            name: "Unpaid leave".to_string(),
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            cache_ttl_ms: default_cache_ttl_ms(),
            default_rate: RateType::Ord,
            pay_items: default_pay_items(),
            staff: Vec::new(),
            current_staff: None,
        }
    }
}

impl Config {
    /// Platform config directory (~/.jobsheet, or %APPDATA%\jobsheet on Windows)
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("jobsheet")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".jobsheet")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("jobsheet.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("jobsheet.sqlite")
    }

    /// Load the config file, or defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.cache_ttl_ms <= 0 {
            return Err(AppError::Config(format!(
                "cache_ttl_ms must be positive, got {}",
                self.cache_ttl_ms
            )));
        }
        if let RateType::Other(label) = &self.default_rate {
            return Err(AppError::Config(format!(
                "default_rate '{label}' is not one of Ord, 1.5, 2.0, Unpaid"
            )));
        }
        if let Some(p) = self.pay_items.iter().find(|p| !p.multiplier.is_finite()) {
            return Err(AppError::Config(format!(
                "pay item '{}' has an invalid multiplier",
                p.id
            )));
        }
        if let Some(id) = &self.current_staff
            && !self.staff.iter().any(|s| &s.id == id)
        {
            return Err(AppError::Config(format!(
                "current_staff '{id}' is not listed under staff"
            )));
        }
        Ok(())
    }

    /// Write the config as YAML, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Keys from REQUIRED_KEYS absent in the file at `path`.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path)?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let map = yaml
            .as_mapping()
            .ok_or_else(|| AppError::Config("config file is not a YAML mapping".into()))?;

        Ok(REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }

    pub fn cache_ttl(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.cache_ttl_ms)
    }

    /// Staff record of the configured (or overridden) current staff member.
    pub fn current_staff_record(&self, override_id: Option<&str>) -> Option<StaffRecord> {
        let id = override_id.or(self.current_staff.as_deref())?;
        self.staff(id)
    }
}

impl PayItemLookup for Config {
    fn pay_item_for(&self, multiplier: f64) -> Option<PayItem> {
        self.pay_items
            .iter()
            .find(|p| (p.multiplier - multiplier).abs() < 1e-9)
            .map(|p| PayItem {
                id: p.id.clone(),
                name: p.name.clone(),
            })
    }
}

impl StaffResolver for Config {
    fn staff(&self, staff_id: &str) -> Option<StaffRecord> {
        self.staff.staff(staff_id)
    }
}
