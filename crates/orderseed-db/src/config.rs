//! # Seed Configuration
//!
//! Where a run connects and how much it writes.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by bin/seed)         │
//! │     --uri mongodb://db:27017 --orders 1000                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     ORDERSEED_MONGODB_URI=mongodb://db:27017                           │
//! │     ORDERSEED_ORDER_BATCHES=2                                          │
//! │                                                                         │
//! │  3. TOML Config File (--config seed.toml)                              │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     localhost:27017, 10k entities, 10 batches of 50k orders            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # seed.toml
//! [database]
//! uri = "mongodb://localhost:27017"
//! name = "orderseed"
//! server_selection_timeout_secs = 5
//!
//! [plan]
//! customers = 1000
//! products = 1000
//! stores = 100
//! orders_per_batch = 5000
//! order_batches = 2
//! insert_chunk_size = 1000
//! probe_email = "Russ51@hotmail.com"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use orderseed_core::SeedPlan;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::connection::DbConfig;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held an unparseable value.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// MongoDB connection string.
    pub uri: String,

    /// Database holding the four collections.
    pub name: String,

    pub app_name: String,

    pub connect_timeout_secs: u64,

    pub server_selection_timeout_secs: u64,

    pub max_pool_size: u32,
}

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "orderseed";

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGODB_URI.to_string(),
            name: DEFAULT_DATABASE.to_string(),
            app_name: "orderseed".to_string(),
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
            max_pool_size: 10,
        }
    }
}

// =============================================================================
// Seed Configuration
// =============================================================================

/// Complete configuration of one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub database: DatabaseSettings,
    pub plan: SeedPlan,
}

impl SeedConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file falls back to defaults. The result is not validated:
    /// callers apply their flags first and then call [`SeedConfig::validate`].
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                debug!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;

        info!(
            database = %config.database.name,
            customers = config.plan.customers,
            orders_per_batch = config.plan.orders_per_batch,
            order_batches = config.plan.order_batches,
            "Seed config loaded"
        );
        Ok(config)
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> ConfigResult<()> {
        let uri = &self.database.uri;
        if !(uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")) {
            return Err(ConfigError::InvalidConfig(format!(
                "MongoDB URI must start with mongodb:// or mongodb+srv://, got '{uri}'"
            )));
        }

        if self.database.name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Database name cannot be empty".into(),
            ));
        }

        if self.plan.insert_chunk_size == 0 {
            return Err(ConfigError::InvalidConfig(
                "Insert chunk size must be greater than 0".into(),
            ));
        }

        let total_orders = self.plan.checked_total_orders().ok_or_else(|| {
            ConfigError::InvalidConfig(format!(
                "{} orders per batch times {} batches overflows",
                self.plan.orders_per_batch, self.plan.order_batches
            ))
        })?;

        if total_orders > 0 {
            for (entity, count) in [
                ("customers", self.plan.customers),
                ("products", self.plan.products),
                ("stores", self.plan.stores),
            ] {
                if count == 0 {
                    return Err(ConfigError::InvalidConfig(format!(
                        "Orders need at least one of each entity, but {entity} is 0"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Driver settings for [`crate::Database::connect`].
    pub fn to_db_config(&self) -> DbConfig {
        DbConfig::new(&self.database.uri, &self.database.name)
            .app_name(&self.database.app_name)
            .max_pool_size(self.database.max_pool_size)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
            .server_selection_timeout(Duration::from_secs(
                self.database.server_selection_timeout_secs,
            ))
    }

    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `ORDERSEED_*` values returned by `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("ORDERSEED_MONGODB_URI") {
            debug!("Overriding MongoDB URI from environment");
            self.database.uri = uri;
        }

        if let Some(name) = lookup("ORDERSEED_DATABASE") {
            self.database.name = name;
        }

        if let Some(email) = lookup("ORDERSEED_PROBE_EMAIL") {
            self.plan.probe_email = email;
        }

        let counts = [
            ("ORDERSEED_CUSTOMERS", &mut self.plan.customers),
            ("ORDERSEED_PRODUCTS", &mut self.plan.products),
            ("ORDERSEED_STORES", &mut self.plan.stores),
            ("ORDERSEED_ORDERS_PER_BATCH", &mut self.plan.orders_per_batch),
            ("ORDERSEED_ORDER_BATCHES", &mut self.plan.order_batches),
            ("ORDERSEED_CHUNK_SIZE", &mut self.plan.insert_chunk_size),
        ];
        for (key, slot) in counts {
            if let Some(value) = lookup(key) {
                *slot = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                })?;
                debug!(key, value = *slot, "Overriding count from environment");
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SeedConfig::default();
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
        assert_eq!(config.database.name, "orderseed");
        assert_eq!(config.plan.total_orders(), 500_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: SeedConfig = toml::from_str(
            r#"
            [database]
            name = "bench"

            [plan]
            customers = 5
            order_batches = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.database.name, "bench");
        assert_eq!(config.database.uri, DEFAULT_MONGODB_URI);
        assert_eq!(config.plan.customers, 5);
        assert_eq!(config.plan.order_batches, 1);
        assert_eq!(config.plan.products, 10_000);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = SeedConfig::default();
        config
            .apply_overrides(env(&[
                ("ORDERSEED_MONGODB_URI", "mongodb+srv://cluster.example.net"),
                ("ORDERSEED_ORDER_BATCHES", "3"),
                ("ORDERSEED_CHUNK_SIZE", " 500 "),
                ("ORDERSEED_PROBE_EMAIL", "a@b.c"),
            ]))
            .unwrap();

        assert_eq!(config.database.uri, "mongodb+srv://cluster.example.net");
        assert_eq!(config.plan.order_batches, 3);
        assert_eq!(config.plan.insert_chunk_size, 500);
        assert_eq!(config.plan.probe_email, "a@b.c");
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = SeedConfig::default();
        let err = config
            .apply_overrides(env(&[("ORDERSEED_STORES", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "ORDERSEED_STORES"));
    }

    #[test]
    fn test_validate() {
        let mut config = SeedConfig::default();
        config.database.uri = "http://localhost".into();
        assert!(config.validate().is_err());

        let mut config = SeedConfig::default();
        config.database.name = "  ".into();
        assert!(config.validate().is_err());

        let mut config = SeedConfig::default();
        config.plan.insert_chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = SeedConfig::default();
        config.plan.stores = 0;
        assert!(config.validate().is_err());
        config.plan.order_batches = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_order_overflow() {
        let mut config = SeedConfig::default();
        config.plan.orders_per_batch = usize::MAX;
        config.plan.order_batches = 2;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        config.plan.order_batches = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_defers_validation_to_caller() {
        let path = std::env::temp_dir().join(format!(
            "orderseed-defer-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[plan]\ninsert_chunk_size = 0\nstores = 0\n").unwrap();

        let loaded = SeedConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let mut config = loaded.unwrap();
        assert_eq!(config.plan.insert_chunk_size, 0);
        assert!(config.validate().is_err());

        // What `--chunk-size 100 --stores 5` does in the binary.
        config.plan.insert_chunk_size = 100;
        config.plan.stores = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("orderseed-does-not-exist.toml");
        let config = SeedConfig::load(Some(path)).unwrap();
        assert_eq!(config.database.name, DEFAULT_DATABASE);
    }

    #[test]
    fn test_to_db_config() {
        let mut config = SeedConfig::default();
        config.database.server_selection_timeout_secs = 2;
        let db = config.to_db_config();
        assert_eq!(db.database_name, "orderseed");
        assert_eq!(db.server_selection_timeout, Duration::from_secs(2));
    }
}
