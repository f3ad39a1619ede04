//! # Ingest Configuration
//!
//! File locations for the five flat data files.
//!
//! ## Configuration File Format
//! ```toml
//! # till.toml
//! items_path = "data/Items.csv"
//! persons_path = "data/Persons.csv"
//! stores_path = "data/Stores.csv"
//! sales_path = "data/Sales.csv"
//! sale_lines_path = "data/SaleItems.csv"
//! ```
//!
//! Every key is optional; missing keys fall back to the conventional
//! names under `data/`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{IngestError, IngestResult};

/// Locations of the five flat data files for one ingest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Item catalog records.
    #[serde(default = "default_items_path")]
    pub items_path: PathBuf,

    /// Person records.
    #[serde(default = "default_persons_path")]
    pub persons_path: PathBuf,

    /// Store records.
    #[serde(default = "default_stores_path")]
    pub stores_path: PathBuf,

    /// Sale header records.
    #[serde(default = "default_sales_path")]
    pub sales_path: PathBuf,

    /// Sale line-item records.
    #[serde(default = "default_sale_lines_path")]
    pub sale_lines_path: PathBuf,
}

fn default_items_path() -> PathBuf {
    PathBuf::from("data/Items.csv")
}

fn default_persons_path() -> PathBuf {
    PathBuf::from("data/Persons.csv")
}

fn default_stores_path() -> PathBuf {
    PathBuf::from("data/Stores.csv")
}

fn default_sales_path() -> PathBuf {
    PathBuf::from("data/Sales.csv")
}

fn default_sale_lines_path() -> PathBuf {
    PathBuf::from("data/SaleItems.csv")
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            items_path: default_items_path(),
            persons_path: default_persons_path(),
            stores_path: default_stores_path(),
            sales_path: default_sales_path(),
            sale_lines_path: default_sale_lines_path(),
        }
    }
}

impl IngestConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> IngestResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file from disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|source| IngestError::source(path, source))?;
        let config = Self::from_toml_str(&contents)?;
        info!(?path, "Loaded ingest config");
        Ok(config)
    }

    /// Points all five files at their conventional names under `dir`.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        IngestConfig {
            items_path: dir.join("Items.csv"),
            persons_path: dir.join("Persons.csv"),
            stores_path: dir.join("Stores.csv"),
            sales_path: dir.join("Sales.csv"),
            sale_lines_path: dir.join("SaleItems.csv"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = IngestConfig::default();
        assert_eq!(config.items_path, PathBuf::from("data/Items.csv"));
        assert_eq!(config.sale_lines_path, PathBuf::from("data/SaleItems.csv"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = IngestConfig::from_toml_str("items_path = \"custom/Catalog.csv\"").unwrap();
        assert_eq!(config.items_path, PathBuf::from("custom/Catalog.csv"));
        assert_eq!(config.persons_path, PathBuf::from("data/Persons.csv"));
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = IngestConfig::from_toml_str("").unwrap();
        assert_eq!(config, IngestConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = IngestConfig::from_toml_str("items_path = 5").unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
    }

    #[test]
    fn test_from_data_dir() {
        let config = IngestConfig::from_data_dir("/srv/till");
        assert_eq!(config.items_path, PathBuf::from("/srv/till/Items.csv"));
        assert_eq!(config.sales_path, PathBuf::from("/srv/till/Sales.csv"));
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let err = IngestConfig::from_toml_file("/no/such/till.toml").unwrap_err();
        assert!(err.to_string().contains("/no/such/till.toml"));
    }
}
