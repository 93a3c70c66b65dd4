//! services/web/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use inventory_core::Locale;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// The `DATA_DIR` value that selects the in-memory store.
pub const IN_MEMORY: &str = ":memory:";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the key/value store keeps its entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageLocation {
    /// Nothing survives a restart. Used for demos and tests.
    Memory,
    /// One file per key under this directory.
    Directory(PathBuf),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub storage: StorageLocation,
    pub log_level: Level,
    pub locale: Locale,
    /// Load the sample catalog when the store is empty at start-up.
    pub seed_sample_data: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Server ---
        let bind_address_str = var_or("BIND_ADDRESS", "127.0.0.1:3000");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Storage ---
        let data_dir = var_or("DATA_DIR", "./data");
        let storage = match data_dir.trim() {
            IN_MEMORY => StorageLocation::Memory,
            "" => {
                return Err(ConfigError::InvalidValue(
                    "DATA_DIR".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            dir => StorageLocation::Directory(PathBuf::from(dir)),
        };

        // --- Presentation ---
        let locale = var_or("APP_LOCALE", "en")
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidValue("APP_LOCALE".to_string(), e.to_string()))?;

        let seed_str = var_or("SEED_SAMPLE_DATA", "true");
        let seed_sample_data = parse_bool(&seed_str).ok_or_else(|| {
            ConfigError::InvalidValue(
                "SEED_SAMPLE_DATA".to_string(),
                format!("'{}' is not a boolean", seed_str),
            )
        })?;

        Ok(Self {
            bind_address,
            storage,
            log_level,
            locale,
            seed_sample_data,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
