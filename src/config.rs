use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::cohort::{
    CohortRules, DEFAULT_CURRENT_COHORT, DEFAULT_CURRENT_LABEL, DEFAULT_SENTINELS,
    DEFAULT_START_YEAR,
};

/// Environment variable pointing at the config file.
pub const CONFIG_ENV: &str = "STARTUPS_DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Data locations and cohort rules. Every field may be omitted in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub founders_path: PathBuf,
    pub startups_path: PathBuf,
    pub start_year: i32,
    pub sentinels: Vec<String>,
    pub current_label: String,
    pub current_cohort: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            founders_path: PathBuf::from("Cleaned_Founders_Data.csv"),
            startups_path: PathBuf::from("Cleaned_Startup_Data.csv"),
            start_year: DEFAULT_START_YEAR,
            sentinels: DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect(),
            current_label: DEFAULT_CURRENT_LABEL.to_string(),
            current_cohort: DEFAULT_CURRENT_COHORT,
        }
    }
}

impl DashboardConfig {
    /// Read the config named by [`CONFIG_ENV`], else `dashboard.json`.
    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn cohort_rules(&self) -> CohortRules {
        CohortRules {
            sentinels: self.sentinels.clone(),
            current_label: self.current_label.clone(),
            current_cohort: self.current_cohort,
            start_year: self.start_year,
        }
    }
}
