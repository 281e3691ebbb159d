//! Main application configuration
//!
//! This module defines the configuration structures for the padel-league
//! host application, including TOML and environment variable loading and
//! validation.

use crate::config::admin::AdminCredentials;
use crate::ledger::PointsTable;
use crate::ranking::awards::DEFAULT_MIN_MATCHES;
use crate::types::DEFAULT_CLUB_NAME;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub league: LeagueSettings,
    pub admin: AdminCredentials,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the club document lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON snapshot of the whole club document
    pub store_path: PathBuf,
}

/// League rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSettings {
    /// Club name for a freshly created document
    pub club_name: String,
    /// Completed matches needed to qualify for the level awards
    pub award_min_matches: u32,
    /// Level given to new players
    pub default_level: f64,
    /// Points per win, bonus and loss
    pub points: PointsTable,
    /// Link appended to match announcements
    pub signup_url: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "padel-league".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("club.json"),
        }
    }
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            club_name: DEFAULT_CLUB_NAME.to_string(),
            award_min_matches: DEFAULT_MIN_MATCHES,
            default_level: 1.0,
            points: PointsTable::default(),
            signup_url: None,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", name, value)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Storage settings
        if let Ok(path) = env::var("STORE_PATH") {
            self.storage.store_path = PathBuf::from(path);
        }

        // League settings
        if let Ok(club_name) = env::var("CLUB_NAME") {
            self.league.club_name = club_name;
        }
        if let Some(min_matches) = parse_env("AWARD_MIN_MATCHES")? {
            self.league.award_min_matches = min_matches;
        }
        if let Some(level) = parse_env("DEFAULT_LEVEL")? {
            self.league.default_level = level;
        }
        if let Some(win) = parse_env("WIN_POINTS")? {
            self.league.points.win = win;
        }
        if let Some(bonus) = parse_env("BONUS_POINTS")? {
            self.league.points.bonus = bonus;
        }
        if let Some(loss) = parse_env("LOSS_POINTS")? {
            self.league.points.loss = loss;
        }
        if let Ok(url) = env::var("SIGNUP_URL") {
            self.league.signup_url = Some(url);
        }

        // Admin credentials
        if let Ok(password) = env::var("ADMIN_PASSWORD") {
            self.admin.admin_password = Some(password);
        }
        if let Ok(password) = env::var("SUPER_ADMIN_PASSWORD") {
            self.admin.super_password = Some(password);
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.storage.store_path.as_os_str().is_empty() {
        return Err(anyhow!("Store path cannot be empty"));
    }

    if config.league.club_name.trim().is_empty() {
        return Err(anyhow!("Club name cannot be empty"));
    }
    if !config.league.default_level.is_finite() || config.league.default_level <= 0.0 {
        return Err(anyhow!("Default level must be positive"));
    }
    if config.league.points.win <= config.league.points.loss {
        return Err(anyhow!("A win must be worth more points than a loss"));
    }

    if let (Some(admin), Some(sup)) = (&config.admin.admin_password, &config.admin.super_password)
    {
        if admin == sup {
            return Err(anyhow!(
                "Admin and super admin passwords must be different"
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.league.points.win, 3);
        assert_eq!(config.league.award_min_matches, 3);
        assert_eq!(config.league.club_name, "Club Pádel");
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [league]
            club_name = "Padel Norte"
            award_min_matches = 5

            [league.points]
            win = 3
            bonus = 2
            loss = 1

            [admin]
            admin_password = "club"
            "#,
        )
        .unwrap();
        assert_eq!(config.league.club_name, "Padel Norte");
        assert_eq!(config.league.award_min_matches, 5);
        assert_eq!(config.league.points.bonus, 2);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.admin.admin_password.as_deref(), Some("club"));
        assert!(config.admin.super_password.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.league.points.win = 1;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.admin = AdminCredentials::new("same", "same");
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.league.default_level = 0.0;
        assert!(validate_config(&config).is_err());
    }
}
