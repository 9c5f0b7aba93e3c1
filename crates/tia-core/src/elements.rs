//! Standard atomic weights used for weight-to-atomic percent conversion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, TiaError};

/// Atomic weights (g/mol) for the elements found in the titanium datasets.
pub const STANDARD_ATOMIC_WEIGHTS: &[(&str, f64)] = &[
    ("Ti", 47.867),
    ("Al", 26.9815385),
    ("V", 50.9415),
    ("Mo", 95.95),
    ("Fe", 55.845),
    ("Cr", 51.9961),
    ("Sn", 118.71),
    ("Zr", 91.224),
    ("O", 15.999),
    ("W", 183.84),
    ("Si", 28.09),
    ("Y", 88.91),
    ("Nb", 92.91),
    ("C", 12.01),
    ("Bi", 208.98),
    ("Nd", 144.24),
    ("Ta", 180.95),
];

/// Lookup table from element symbol to atomic weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomicWeights(BTreeMap<String, f64>);

impl AtomicWeights {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the weight for `symbol`, if known.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.0.get(symbol).copied()
    }

    /// Returns the weight for `symbol` or an error naming the element.
    pub fn require(&self, symbol: &str) -> Result<f64, TiaError> {
        self.get(symbol).ok_or_else(|| {
            TiaError::Composition(
                ErrorInfo::new(
                    "tia_core.atomic_weight_missing",
                    format!("atomic weight missing for {symbol}"),
                )
                .with_element(symbol)
                .with_hint("add the element under `atomic_weights` in the export config"),
            )
        })
    }

    /// Inserts or replaces the weight for `symbol`.
    pub fn insert(&mut self, symbol: impl Into<String>, weight: f64) -> Result<(), TiaError> {
        let symbol = symbol.into();
        if !weight.is_finite() || weight <= 0.0 {
            return Err(TiaError::Config(
                ErrorInfo::new(
                    "tia_core.atomic_weight_invalid",
                    format!("atomic weight for {symbol} must be positive, got {weight}"),
                )
                .with_element(&symbol),
            ));
        }
        self.0.insert(symbol, weight);
        Ok(())
    }

    /// Returns a copy of this table with `overrides` applied on top.
    pub fn merged(&self, overrides: &BTreeMap<String, f64>) -> Result<Self, TiaError> {
        let mut merged = self.clone();
        for (symbol, weight) in overrides {
            merged.insert(symbol.clone(), *weight)?;
        }
        Ok(merged)
    }

    /// Number of known elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AtomicWeights {
    fn default() -> Self {
        Self(
            STANDARD_ATOMIC_WEIGHTS
                .iter()
                .map(|(symbol, weight)| ((*symbol).to_string(), *weight))
                .collect(),
        )
    }
}
