//! Structured error types shared across the alloy toolkit crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`TiaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (tables, columns, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Records the file or directory the error refers to under `path`.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Records the alloy the error refers to under `alloy_id`.
    pub fn with_alloy(self, alloy_id: &str) -> Self {
        self.with_context("alloy_id", alloy_id)
    }

    /// Records the element symbol the error refers to under `element`.
    pub fn with_element(self, element: &str) -> Self {
        self.with_context("element", element)
    }
}

/// Canonical error type for the alloy toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TiaError {
    /// Reading input files or parsing CSV rows.
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Table layout problems such as missing columns or unusable identifiers.
    #[error("schema error: {0}")]
    Schema(ErrorInfo),
    /// Atomic weight lookups and composition normalisation.
    #[error("composition error: {0}")]
    Composition(ErrorInfo),
    /// Cross-table identifier joins.
    #[error("join error: {0}")]
    Join(ErrorInfo),
    /// Writing documents or figures.
    #[error("output error: {0}")]
    Output(ErrorInfo),
    /// Loading configuration files.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

/// Renders as `message [code] (key=value, ...) hint: ...`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, " hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl TiaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TiaError::Input(info)
            | TiaError::Schema(info)
            | TiaError::Composition(info)
            | TiaError::Join(info)
            | TiaError::Output(info)
            | TiaError::Config(info) => info,
        }
    }

    /// Stable error code, e.g. `tia_data.missing_column`.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Lower-case family name matching the `Display` prefix.
    pub fn family(&self) -> &'static str {
        match self {
            TiaError::Input(_) => "input",
            TiaError::Schema(_) => "schema",
            TiaError::Composition(_) => "composition",
            TiaError::Join(_) => "join",
            TiaError::Output(_) => "output",
            TiaError::Config(_) => "config",
        }
    }
}
