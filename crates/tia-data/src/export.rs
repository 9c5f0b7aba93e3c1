use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tia_core::elements::AtomicWeights;
use tia_core::errors::{ErrorInfo, TiaError};
use tracing::{debug, info, warn};

use crate::composition::compute_compositions;
use crate::config::ExportConfig;
use crate::document::AlloyDocument;
use crate::ingest::load_dataset;
use crate::schema::{Dataset, MechanicalRecord, MetadataRecord, MicrostructureRecord};
use crate::serde::write_pretty_json;

/// Result of intersecting alloy ids across the four tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinOutcome {
    /// Ids present in every table, sorted.
    pub common: BTreeSet<String>,
    /// Ids present in at least one table but not all four, sorted.
    pub dropped: BTreeSet<String>,
}

/// Summary of a completed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub out_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub dropped: Vec<String>,
}

impl ExportSummary {
    /// Line printed once the export finishes.
    pub fn status_line(&self) -> String {
        format!(
            "Generated {} JSON files in '{}'",
            self.written.len(),
            self.out_dir.display()
        )
    }
}

fn ids<'a, I>(rows: I) -> BTreeSet<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    rows.into_iter().collect()
}

/// Intersects the alloy ids of the four tables.
pub fn join_ids(dataset: &Dataset) -> JoinOutcome {
    let tables = [
        ids(dataset.mechanical.iter().map(|row| row.alloy_id.as_str())),
        ids(dataset.microstructure.iter().map(|row| row.alloy_id.as_str())),
        ids(dataset.composition.iter().map(|row| row.alloy_id.as_str())),
        ids(dataset.metadata.iter().map(|row| row.alloy_id.as_str())),
    ];
    let mut common = tables[0].clone();
    for table in &tables[1..] {
        common.retain(|id| table.contains(id));
    }
    let dropped = tables
        .iter()
        .flatten()
        .filter(|id| !common.contains(*id))
        .map(|id| id.to_string())
        .collect();
    JoinOutcome {
        common: common.into_iter().map(str::to_string).collect(),
        dropped,
    }
}

fn first_by_id<T, F>(rows: &[T], key: F) -> HashMap<&str, &T>
where
    F: Fn(&T) -> &str,
{
    let mut map = HashMap::new();
    for row in rows {
        map.entry(key(row)).or_insert(row);
    }
    map
}

/// Builds one document per alloy present in all four tables, in sorted id
/// order.
pub fn assemble_documents(
    dataset: &Dataset,
    weights: &AtomicWeights,
) -> Result<(Vec<AlloyDocument>, JoinOutcome), TiaError> {
    let mut compositions = compute_compositions(&dataset.composition, weights)?;
    let outcome = join_ids(dataset);
    if outcome.common.is_empty() {
        return Err(TiaError::Join(
            ErrorInfo::new("tia_data.no_common_ids", "No common alloy_id across all CSVs")
                .with_context("dropped", outcome.dropped.len().to_string()),
        ));
    }
    for id in &outcome.dropped {
        warn!(alloy_id = %id, "alloy missing from at least one table, dropped");
    }

    let mechanical: HashMap<&str, &MechanicalRecord> =
        first_by_id(&dataset.mechanical, |row| row.alloy_id.as_str());
    let metadata: HashMap<&str, &MetadataRecord> =
        first_by_id(&dataset.metadata, |row| row.alloy_id.as_str());
    let mut microstructure: BTreeMap<&str, Vec<&MicrostructureRecord>> = BTreeMap::new();
    for row in &dataset.microstructure {
        microstructure.entry(row.alloy_id.as_str()).or_default().push(row);
    }

    let mut documents = Vec::with_capacity(outcome.common.len());
    for id in &outcome.common {
        let key = id.as_str();
        let (Some(mech), Some(meta), Some(phases), Some(composition)) = (
            mechanical.get(key),
            metadata.get(key),
            microstructure.get(key),
            compositions.remove(key),
        ) else {
            return Err(TiaError::Join(
                ErrorInfo::new("tia_data.join_lookup", format!("rows for {id} vanished"))
                    .with_alloy(id),
            ));
        };
        debug!(alloy_id = %id, phases = phases.len(), "assembling document");
        documents.push(AlloyDocument::assemble(mech, meta, phases, composition));
    }
    Ok((documents, outcome))
}

/// Rejects ids that cannot name a file inside the output directory.
fn document_path(out_dir: &Path, alloy_id: &str) -> Result<PathBuf, TiaError> {
    if alloy_id.is_empty()
        || alloy_id == "."
        || alloy_id == ".."
        || alloy_id.contains(['/', '\\'])
    {
        return Err(TiaError::Schema(
            ErrorInfo::new(
                "tia_data.alloy_id_path",
                format!("alloy_id {alloy_id:?} cannot be used as a file name"),
            )
            .with_alloy(alloy_id),
        ));
    }
    Ok(out_dir.join(format!("{alloy_id}.json")))
}

/// Writes each document to `<out_dir>/<alloy_id>.json`, overwriting files.
pub fn write_documents(
    documents: &[AlloyDocument],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, TiaError> {
    fs::create_dir_all(out_dir).map_err(|err| {
        TiaError::Output(
            ErrorInfo::new("tia_data.output_dir", err.to_string()).with_path(out_dir),
        )
    })?;
    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let path = document_path(out_dir, &document.alloy_id)?;
        write_pretty_json(&path, document)?;
        written.push(path);
    }
    Ok(written)
}

/// Runs the full export: load, convert, join, write.
pub fn export_documents(config: &ExportConfig) -> Result<ExportSummary, TiaError> {
    let weights = config.weights()?;
    let dataset = load_dataset(&config.data_dir)?;
    let (documents, outcome) = assemble_documents(&dataset, &weights)?;
    let written = write_documents(&documents, &config.out_dir)?;
    info!(
        written = written.len(),
        dropped = outcome.dropped.len(),
        out_dir = %config.out_dir.display(),
        "export finished"
    );
    Ok(ExportSummary {
        out_dir: config.out_dir.clone(),
        written,
        dropped: outcome.dropped.into_iter().collect(),
    })
}
