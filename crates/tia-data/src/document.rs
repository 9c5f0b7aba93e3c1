use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::schema::{MechanicalRecord, MetadataRecord, MicrostructureRecord};

/// Per-alloy JSON document. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlloyDocument {
    pub alloy_id: String,
    pub phase_class: String,
    pub composition: Composition,
    pub mechanical_properties: MechanicalProperties,
    pub test_conditions: TestConditions,
    pub microstructure: Vec<PhaseDescriptor>,
    pub metadata: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalProperties {
    #[serde(rename = "yield_strength_MPa")]
    pub yield_strength_mpa: Option<f64>,
    #[serde(rename = "ultimate_tensile_strength_MPa")]
    pub ultimate_tensile_strength_mpa: Option<f64>,
    pub elongation_pct: Option<f64>,
    pub hardness: Hardness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hardness {
    pub value: Option<f64>,
    pub scale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConditions {
    #[serde(rename = "temperature_K")]
    pub temperature_k: Option<f64>,
    #[serde(rename = "strain_rate_s-1")]
    pub strain_rate_per_s: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDescriptor {
    pub phase: Option<String>,
    pub shape: Option<String>,
    pub volume_fraction: Option<f64>,
    pub grain_size_um: Option<f64>,
    pub identification_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    pub source_type: Option<String>,
    pub data_location: Option<String>,
    pub processing_history: Option<String>,
    pub test_standard: Option<String>,
}

impl From<&MicrostructureRecord> for PhaseDescriptor {
    fn from(record: &MicrostructureRecord) -> Self {
        Self {
            phase: record.phase.clone(),
            shape: record.shape.clone(),
            volume_fraction: record.volume_fraction,
            grain_size_um: record.grain_size_um,
            identification_method: record.identification_method.clone(),
        }
    }
}

impl From<&MetadataRecord> for Provenance {
    fn from(record: &MetadataRecord) -> Self {
        Self {
            doi: record.doi.clone(),
            source_type: record.source_type.clone(),
            data_location: record.data_location.clone(),
            processing_history: record.processing_history.clone(),
            test_standard: record.test_standard.clone(),
        }
    }
}

impl AlloyDocument {
    /// Merges the rows belonging to one alloy into a document.
    pub fn assemble(
        mechanical: &MechanicalRecord,
        metadata: &MetadataRecord,
        microstructure: &[&MicrostructureRecord],
        composition: Composition,
    ) -> Self {
        Self {
            alloy_id: mechanical.alloy_id.clone(),
            phase_class: mechanical.phase_class.clone(),
            composition,
            mechanical_properties: MechanicalProperties {
                yield_strength_mpa: mechanical.yield_strength_mpa,
                ultimate_tensile_strength_mpa: mechanical.uts_mpa,
                elongation_pct: mechanical.elongation_pct,
                hardness: Hardness {
                    value: mechanical.hardness_value,
                    scale: mechanical.hardness_scale.clone(),
                },
            },
            test_conditions: TestConditions {
                temperature_k: mechanical.test_temp_k,
                strain_rate_per_s: mechanical.strain_rate_per_s,
            },
            microstructure: microstructure.iter().copied().map(PhaseDescriptor::from).collect(),
            metadata: Provenance::from(metadata),
        }
    }
}
