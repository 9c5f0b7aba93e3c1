use std::fs;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tia_core::errors::{ErrorInfo, TiaError};

fn serde_error(code: &str, err: impl ToString) -> TiaError {
    TiaError::Output(ErrorInfo::new(code, err.to_string()))
}

/// Serializes a value as UTF-8 JSON indented by two spaces, without a
/// trailing newline. Output depends only on the value, so repeated exports
/// are byte-identical.
pub fn to_pretty_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, TiaError> {
    serde_json::to_vec_pretty(value).map_err(|err| serde_error("tia_data.json_serialize", err))
}

/// Writes `value` to `path` as pretty JSON, replacing any existing file.
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<(), TiaError> {
    let bytes = to_pretty_json_bytes(value)?;
    fs::write(path, bytes).map_err(|err| {
        TiaError::Output(
            ErrorInfo::new("tia_data.json_write", err.to_string()).with_path(path),
        )
    })
}

/// Reads a JSON document back from disk.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TiaError> {
    let bytes = fs::read(path).map_err(|err| {
        TiaError::Input(
            ErrorInfo::new("tia_data.json_read", err.to_string()).with_path(path),
        )
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        TiaError::Input(
            ErrorInfo::new("tia_data.json_parse", err.to_string()).with_path(path),
        )
    })
}
