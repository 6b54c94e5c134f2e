use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::schedule::{CurrentPrayerPolicy, PreFajrPolicy};

fn default_method() -> u32 {
    3
}
fn default_pre_fajr() -> PreFajrPolicy {
    PreFajrPolicy::WrapToIsha
}
fn default_prayer_base_url() -> String {
    "https://api.aladhan.com/v1".to_string()
}
fn default_geo_url() -> String {
    "http://ip-api.com/json".to_string()
}
fn default_city_url() -> String {
    "https://api.api-ninjas.com/v1/city".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerConfig {
    /// Calculation method id passed through to the timings feed.
    #[serde(default = "default_method")]
    pub method: u32,
    #[serde(default = "default_pre_fajr")]
    pub pre_fajr: PreFajrPolicy,
    /// Give Sunrise its own highlight window instead of jumping
    /// straight to Dhuhr after Fajr's window closes.
    #[serde(default)]
    pub sunrise_window: bool,
}

impl Default for PrayerConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            pre_fajr: default_pre_fajr(),
            sunrise_window: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_prayer_base_url")]
    pub prayer_base_url: String,
    #[serde(default = "default_geo_url")]
    pub geo_url: String,
    #[serde(default = "default_city_url")]
    pub city_url: String,
    /// Key for the city search service. Search stays disabled while
    /// this is empty.
    #[serde(default)]
    pub city_api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            prayer_base_url: default_prayer_base_url(),
            geo_url: default_geo_url(),
            city_url: default_city_url(),
            city_api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompassConfig {
    /// Starting heading for the simulated compass, degrees from north.
    #[serde(default)]
    pub initial_heading: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub prayer: PrayerConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub compass: CompassConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "mihrab").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("mihrab.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn current_prayer_policy(&self) -> CurrentPrayerPolicy {
        CurrentPrayerPolicy {
            pre_fajr: self.prayer.pre_fajr,
            sunrise_window: self.prayer.sunrise_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.prayer.method, 3);
        assert_eq!(config.prayer.pre_fajr, PreFajrPolicy::WrapToIsha);
        assert!(!config.prayer.sunrise_window);
        assert_eq!(config.bridge.timeout_secs, 10);
        assert!(config.bridge.city_api_key.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_missing_fields() {
        let config: AppConfig = toml::from_str(
            "[prayer]\npre_fajr = \"upcoming-fajr\"\n\n[bridge]\ntimeout_secs = 3\n",
        )
        .unwrap();
        assert_eq!(config.prayer.pre_fajr, PreFajrPolicy::UpcomingFajr);
        assert_eq!(config.prayer.method, 3);
        assert_eq!(config.bridge.timeout_secs, 3);
        assert_eq!(config.bridge.geo_url, "http://ip-api.com/json");
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.prayer.sunrise_window = true;
        config.bridge.city_api_key = "k".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert!(back.prayer.sunrise_window);
        assert_eq!(back.bridge.city_api_key, "k");
    }
}
