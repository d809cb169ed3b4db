//! Configuration management.
//!
//! Settings live in a JSON file in the platform data directory and split
//! into three sections: cloud API access, response cache TTLs and the
//! report workflow (worker pool sizing, retry policy, quality thresholds).
//! `Config::init()` runs the interactive setup wizard; `Config::read()`
//! falls back to defaults when no file exists and lets the `CAMWATCH_API_KEY`
//! environment variable (including via `.env`) override the stored key.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::policy::ProblemPolicy;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

pub const CONFIG_FILE_NAME: &str = "config.json";

const API_KEY_ENV: &str = "CAMWATCH_API_KEY";

/// Cloud API access settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Inventory page size; the upstream caps pages at 1000 entries.
    pub per_page: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lk.camera.cloud/api".to_string(),
            api_key: String::new(),
            per_page: 1000,
        }
    }
}

/// TTLs for the in-run response caches, in seconds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CacheConfig {
    pub cameras_ttl_secs: u64,
    pub health_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cameras_ttl_secs: 60,
            health_ttl_secs: 30,
        }
    }
}

/// Fleet report workflow settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// Analysis window in days, counted back from now.
    pub period_days: u32,
    /// Concurrent fragment fetches.
    pub workers: usize,
    /// Fetch attempts per camera before giving up.
    pub max_retries: u32,
    /// Initial backoff in seconds, doubled after each failed attempt.
    pub retry_delay_secs: u64,
    pub policy: ProblemPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            period_days: 7,
            workers: 8,
            max_retries: 3,
            retry_delay_secs: 2,
            policy: ProblemPolicy::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Loads the configuration, or defaults when no file has been written yet.
    pub fn read() -> Result<Self> {
        dotenv::dotenv().ok();

        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let mut config: Config = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Config::default()
        };

        if let Ok(key) = env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api.api_key = key;
            }
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Interactive setup wizard. Starts from the current configuration so
    /// re-running it only changes what the user edits.
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;
        msg_print!(Message::ConfigWizardHeader, true);

        let theme = ColorfulTheme::default();
        config.api.base_url = Input::with_theme(&theme)
            .with_prompt("API base URL")
            .default(config.api.base_url.clone())
            .interact_text()?;
        config.api.api_key = Input::with_theme(&theme)
            .with_prompt(format!("API key (or set {})", API_KEY_ENV))
            .default(config.api.api_key.clone())
            .allow_empty(true)
            .interact_text()?;
        config.report.period_days = Input::with_theme(&theme)
            .with_prompt("Report period, days")
            .default(config.report.period_days)
            .interact_text()?;
        config.report.workers = Input::with_theme(&theme)
            .with_prompt("Report workers")
            .default(config.report.workers)
            .interact_text()?;
        config.cache.cameras_ttl_secs = Input::with_theme(&theme)
            .with_prompt("Camera list cache TTL, seconds")
            .default(config.cache.cameras_ttl_secs)
            .interact_text()?;
        config.cache.health_ttl_secs = Input::with_theme(&theme)
            .with_prompt("Health cache TTL, seconds")
            .default(config.cache.health_ttl_secs)
            .interact_text()?;
        config.report.policy.good_coverage_pct = Input::with_theme(&theme)
            .with_prompt("Good coverage threshold, %")
            .default(config.report.policy.good_coverage_pct)
            .interact_text()?;
        config.report.policy.problem_coverage_pct = Input::with_theme(&theme)
            .with_prompt("Problem coverage threshold, %")
            .default(config.report.policy.problem_coverage_pct)
            .interact_text()?;
        config.report.policy.problem_max_gap_secs = Input::with_theme(&theme)
            .with_prompt("Problem gap threshold, seconds")
            .default(config.report.policy.problem_max_gap_secs)
            .interact_text()?;
        config.report.policy.problem_depth_days = Input::with_theme(&theme)
            .with_prompt("Problem depth threshold, days")
            .default(config.report.policy.problem_depth_days)
            .interact_text()?;

        Ok(config)
    }
}
