use std::fmt;

use serde::{Deserialize, Serialize};
use tia_core::errors::ErrorInfo;

/// The four source tables making up an alloy dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Mechanical,
    Microstructure,
    Composition,
    Metadata,
}

impl Table {
    pub fn label(self) -> &'static str {
        match self {
            Table::Mechanical => "mechanical",
            Table::Microstructure => "microstructure",
            Table::Composition => "composition",
            Table::Metadata => "metadata",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.label())
    }

    /// Columns that must be present after header normalisation, excluding
    /// `alloy_id` which every table requires.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Table::Mechanical => &[
                "phase_class",
                "YS_MPa",
                "UTS_MPa",
                "elong_pct",
                "hardness_value",
                "hardness_scale",
                "test_temp_K",
                "strain_rate_s-1",
            ],
            Table::Microstructure => &[
                "phases_reported",
                "shape",
                "vol_fr",
                "grain_size_um",
                "phase_id_method",
            ],
            Table::Composition => &["element", "wt_pct"],
            Table::Metadata => &[
                "DOI",
                "source_type",
                "data_location",
                "processing_history",
                "test_standard",
            ],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tags an error payload with the table it was raised for.
pub trait WithTable {
    fn with_table(self, table: Table) -> Self;
}

impl WithTable for ErrorInfo {
    fn with_table(self, table: Table) -> Self {
        self.with_context("table", table.label())
    }
}

pub const ALLOY_ID: &str = "alloy_id";

/// Header renames applied after trimming, mapping source spellings onto the
/// internal column names.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[("wt%", "wt_pct"), ("elong_%", "elong_pct")];

/// One row of `mechanical.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalRecord {
    pub alloy_id: String,
    pub phase_class: String,
    pub yield_strength_mpa: Option<f64>,
    pub uts_mpa: Option<f64>,
    pub elongation_pct: Option<f64>,
    pub hardness_value: Option<f64>,
    pub hardness_scale: Option<String>,
    pub test_temp_k: Option<f64>,
    pub strain_rate_per_s: Option<f64>,
}

/// One phase descriptor row of `microstructure.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrostructureRecord {
    pub alloy_id: String,
    pub phase: Option<String>,
    pub shape: Option<String>,
    pub volume_fraction: Option<f64>,
    pub grain_size_um: Option<f64>,
    pub identification_method: Option<String>,
}

/// One `(alloy, element, wt%)` row of `composition.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRecord {
    pub alloy_id: String,
    pub element: String,
    /// Cleaned weight percent; `None` when the cell was unreadable.
    pub wt_pct: Option<f64>,
}

/// One provenance row of `metadata.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub alloy_id: String,
    pub doi: Option<String>,
    pub source_type: Option<String>,
    pub data_location: Option<String>,
    pub processing_history: Option<String>,
    pub test_standard: Option<String>,
}

/// The four typed tables of a dataset, rows kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub mechanical: Vec<MechanicalRecord>,
    pub microstructure: Vec<MicrostructureRecord>,
    pub composition: Vec<CompositionRecord>,
    pub metadata: Vec<MetadataRecord>,
}
