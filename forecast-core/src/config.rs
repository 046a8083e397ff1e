use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{error::API_KEY_ENV, model::Units};

pub const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

/// Default memoization window for lookups, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// days = 7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Visual Crossing API key. Takes precedence over the environment.
    pub api_key: Option<String>,

    /// Default unit group when none is given on the command line.
    pub units: Option<Units>,

    /// Default forecast window in days.
    pub days: Option<u32>,

    pub cache_ttl_secs: Option<u64>,

    /// Override of the timeline endpoint.
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Reject values that would produce an empty or nonsensical request.
    pub fn validate(&self) -> Result<()> {
        if self.days == Some(0) {
            return Err(anyhow!("`days` must be at least 1"));
        }
        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Resolve the API key: config file first, then the environment.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::api_key`] with an injectable environment lookup.
    pub fn api_key_with<F>(&self, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        non_blank(self.api_key.as_deref()).or_else(|| non_blank(env(API_KEY_ENV).as_deref()))
    }

    pub fn units(&self) -> Units {
        self.units.unwrap_or_default()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_key(name: &str) -> Option<String> {
        (name == API_KEY_ENV).then(|| "ENV_KEY".to_string())
    }

    fn empty_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn config_key_wins_over_environment() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(cfg.api_key_with(env_with_key).as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn falls_back_to_environment() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key_with(env_with_key).as_deref(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_values_count_as_absent() {
        let cfg = Config { api_key: Some("   ".into()), ..Config::default() };
        assert_eq!(cfg.api_key_with(|_| Some(String::new())), None);
        assert_eq!(cfg.api_key_with(env_with_key).as_deref(), Some("ENV_KEY"));
    }

    #[test]
    fn no_key_anywhere() {
        assert_eq!(Config::default().api_key_with(empty_env), None);
    }

    #[test]
    fn set_api_key_clears_on_blank() {
        let mut cfg = Config::default();
        cfg.set_api_key("  KEY  ".into());
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        cfg.set_api_key(" ".into());
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.units(), Units::Metric);
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(900));
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn parses_toml() {
        let cfg: Config = toml::from_str(
            r#"
            api_key = "abc"
            units = "us"
            days = 5
            cache_ttl_secs = 0
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.units(), Units::Us);
        assert_eq!(cfg.days, Some(5));
        assert_eq!(cfg.cache_ttl(), Duration::ZERO);
        assert_eq!(cfg.api_key_with(empty_env).as_deref(), Some("abc"));
    }

    #[test]
    fn save_and_load_roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("SAVED".into());
        cfg.units = Some(Units::Us);
        cfg.save_to(&path).expect("save should succeed");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded.api_key.as_deref(), Some("SAVED"));
        assert_eq!(loaded.units(), Units::Us);
    }

    #[test]
    fn zero_days_is_rejected_on_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "days = 0\n").expect("write config");

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("`days` must be at least 1"));
    }

    #[test]
    fn positive_days_validate() {
        let cfg = Config { days: Some(3), ..Config::default() };
        assert!(cfg.validate().is_ok());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing/config.toml");
        let cfg = Config::load_from(&path).expect("missing file is not an error");
        assert!(cfg.api_key.is_none());
    }
}
