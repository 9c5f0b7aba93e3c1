//! YAML configuration loading helpers.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{ErrorInfo, TiaError};

fn config_error(code: &str, err: impl ToString, path: &Path) -> TiaError {
    TiaError::Config(ErrorInfo::new(code, err.to_string()).with_path(path))
}

/// Deserializes a YAML payload into the requested configuration type.
pub fn from_yaml_str<T: DeserializeOwned>(contents: &str) -> Result<T, TiaError> {
    serde_yaml::from_str(contents)
        .map_err(|err| TiaError::Config(ErrorInfo::new("tia_core.config_parse", err.to_string())))
}

/// Reads and deserializes a YAML configuration file.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, TiaError> {
    let contents =
        fs::read_to_string(path).map_err(|err| config_error("tia_core.config_read", err, path))?;
    serde_yaml::from_str(&contents).map_err(|err| config_error("tia_core.config_parse", err, path))
}
