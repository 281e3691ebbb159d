//! Configuration management for the padel-league host
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, default values, and admin credentials.

pub mod admin;
pub mod app;

// Re-export commonly used types
pub use admin::{AdminCredentials, AdminRole};
pub use app::{validate_config, AppConfig, LeagueSettings, ServiceSettings, StorageSettings};
