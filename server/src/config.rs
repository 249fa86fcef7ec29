//! # Application Configuration
//!
//! Immutable settings injected into the services at startup. Values come from
//! a YAML file named by `GIFT_BUDGET_CONFIG`; without one the built-in
//! defaults are used.
//!
//! ```yaml
//! admin_password: "change-me"
//! weeks_per_term: 9
//! terms_per_year: 3
//! currency_symbol: "£"
//! database_url: "sqlite:gift_budget.db"
//! bind_address: "127.0.0.1:3000"
//! allowed_origin: "http://localhost:8080"
//! catalog:
//!   - id: friends
//!     label: Friends
//!     group: Friends
//!     occasions: ["Birthdays", "Other"]
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;

use crate::backend::domain::models::budget::MAX_WEEKS_IN_TERM;
use crate::backend::domain::models::catalog::GiftCatalog;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "GIFT_BUDGET_CONFIG";

/// `database_url` value that selects the in-memory store
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub admin_password: String,
    pub weeks_per_term: u32,
    pub terms_per_year: u32,
    pub currency_symbol: String,
    pub database_url: String,
    pub bind_address: String,
    pub allowed_origin: String,
    pub catalog: GiftCatalog,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_password: "admin2024".to_string(),
            weeks_per_term: 9,
            terms_per_year: 3,
            currency_symbol: "£".to_string(),
            database_url: "sqlite:gift_budget.db".to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            catalog: GiftCatalog::builtin(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `GIFT_BUDGET_CONFIG`, or fall back to defaults
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => {
                info!("{} not set, using built-in configuration", CONFIG_PATH_ENV);
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weeks_per_term == 0 || self.weeks_per_term > MAX_WEEKS_IN_TERM {
            bail!("weeks_per_term must be between 1 and {}", MAX_WEEKS_IN_TERM);
        }
        if self.terms_per_year == 0 {
            bail!("terms_per_year must be at least 1");
        }
        if self.admin_password.is_empty() {
            bail!("admin_password must not be empty");
        }
        self.catalog.validate()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind_address {:?}", self.bind_address))
    }
}
