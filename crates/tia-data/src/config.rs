use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tia_core::elements::AtomicWeights;
use tia_core::errors::TiaError;

/// YAML-configurable settings for the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory holding the four source CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory receiving one `<alloy_id>.json` per exported alloy.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Atomic weights added to, or replacing entries of, the standard table.
    #[serde(default)]
    pub atomic_weights: BTreeMap<String, f64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            out_dir: default_out_dir(),
            atomic_weights: BTreeMap::new(),
        }
    }
}

impl ExportConfig {
    pub fn new(data_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            out_dir: out_dir.into(),
            atomic_weights: BTreeMap::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, TiaError> {
        tia_core::load_yaml(path)
    }

    /// The standard atomic-weight table with configured overrides applied.
    pub fn weights(&self) -> Result<AtomicWeights, TiaError> {
        AtomicWeights::default().merged(&self.atomic_weights)
    }
}
