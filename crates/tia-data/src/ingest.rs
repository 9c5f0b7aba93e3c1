use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tia_core::errors::{ErrorInfo, TiaError};
use tracing::{debug, info, warn};

use crate::clean::clean_cell;
use crate::schema::{
    CompositionRecord, Dataset, MechanicalRecord, MetadataRecord, MicrostructureRecord, Table,
    WithTable, ALLOY_ID, COLUMN_RENAMES,
};

fn input_error(code: &str, table: Table, err: impl ToString) -> TiaError {
    TiaError::Input(ErrorInfo::new(code, err.to_string()).with_table(table))
}

/// Trims a raw header and maps it onto its internal column name.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Column positions of one table, validated against its required columns.
#[derive(Debug, Clone)]
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(table: Table, headers: &StringRecord) -> Result<Self, TiaError> {
        let mut index = HashMap::new();
        for (pos, raw) in headers.iter().enumerate() {
            index.entry(normalize_header(raw)).or_insert(pos);
        }
        let columns = Self { index };
        if !columns.has(ALLOY_ID) {
            return Err(TiaError::Schema(
                ErrorInfo::new(
                    "tia_data.missing_alloy_id",
                    format!("{} missing alloy_id column", table.file_name()),
                )
                .with_table(table)
                .with_context("column", ALLOY_ID),
            ));
        }
        for column in table.required_columns() {
            if !columns.has(column) {
                return Err(TiaError::Schema(
                    ErrorInfo::new(
                        "tia_data.missing_column",
                        format!("{} missing {column} column", table.file_name()),
                    )
                    .with_table(table)
                    .with_context("column", *column),
                ));
            }
        }
        Ok(columns)
    }

    fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

/// Borrowed view of one data row with by-name cell access.
struct Row<'a> {
    columns: &'a Columns,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    fn cell(&self, name: &str) -> Option<&'a str> {
        let pos = *self.columns.index.get(name)?;
        self.record.get(pos).filter(|cell| !cell.is_empty())
    }

    fn text(&self, name: &str) -> Option<String> {
        self.cell(name).map(str::to_string)
    }

    fn number(&self, name: &str) -> Option<f64> {
        clean_cell(self.cell(name))
    }
}

/// Reads every row of `table` from `reader`, skipping rows without an id.
fn read_rows<R, T, F>(table: Table, reader: R, mut build: F) -> Result<Vec<T>, TiaError>
where
    R: Read,
    F: FnMut(&str, &Row<'_>) -> T,
{
    let mut csv = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv
        .headers()
        .map_err(|err| input_error("tia_data.csv_header", table, err))?
        .clone();
    let columns = Columns::from_headers(table, &headers)?;
    let mut rows = Vec::new();
    for result in csv.records() {
        let record = result.map_err(|err| input_error("tia_data.csv_read", table, err))?;
        let row = Row {
            columns: &columns,
            record: &record,
        };
        match row.cell(ALLOY_ID) {
            Some(alloy_id) => rows.push(build(alloy_id, &row)),
            None => {
                let line = record.position().map(|pos| pos.line()).unwrap_or_default();
                warn!(table = table.label(), line, "skipping row without alloy_id");
            }
        }
    }
    debug!(table = table.label(), rows = rows.len(), "table loaded");
    Ok(rows)
}

pub fn read_mechanical<R: Read>(reader: R) -> Result<Vec<MechanicalRecord>, TiaError> {
    read_rows(Table::Mechanical, reader, |alloy_id, row| MechanicalRecord {
        alloy_id: alloy_id.to_string(),
        phase_class: row.text("phase_class").unwrap_or_default(),
        yield_strength_mpa: row.number("YS_MPa"),
        uts_mpa: row.number("UTS_MPa"),
        elongation_pct: row.number("elong_pct"),
        hardness_value: row.number("hardness_value"),
        hardness_scale: row.text("hardness_scale"),
        test_temp_k: row.number("test_temp_K"),
        strain_rate_per_s: row.number("strain_rate_s-1"),
    })
}

pub fn read_microstructure<R: Read>(reader: R) -> Result<Vec<MicrostructureRecord>, TiaError> {
    read_rows(Table::Microstructure, reader, |alloy_id, row| {
        MicrostructureRecord {
            alloy_id: alloy_id.to_string(),
            phase: row.text("phases_reported"),
            shape: row.text("shape"),
            volume_fraction: row.number("vol_fr"),
            grain_size_um: row.number("grain_size_um"),
            identification_method: row.text("phase_id_method"),
        }
    })
}

pub fn read_composition<R: Read>(reader: R) -> Result<Vec<CompositionRecord>, TiaError> {
    read_rows(Table::Composition, reader, |alloy_id, row| CompositionRecord {
        alloy_id: alloy_id.to_string(),
        element: row.text("element").unwrap_or_default(),
        wt_pct: row.number("wt_pct"),
    })
}

pub fn read_metadata<R: Read>(reader: R) -> Result<Vec<MetadataRecord>, TiaError> {
    read_rows(Table::Metadata, reader, |alloy_id, row| MetadataRecord {
        alloy_id: alloy_id.to_string(),
        doi: row.text("DOI"),
        source_type: row.text("source_type"),
        data_location: row.text("data_location"),
        processing_history: row.text("processing_history"),
        test_standard: row.text("test_standard"),
    })
}

fn open_table(data_dir: &Path, table: Table) -> Result<File, TiaError> {
    let path = data_dir.join(table.file_name());
    File::open(&path).map_err(|err| {
        TiaError::Input(
            ErrorInfo::new(
                "tia_data.csv_open",
                format!("failed to open {}: {err}", path.display()),
            )
            .with_table(table)
            .with_path(&path),
        )
    })
}

/// Loads all four tables from `data_dir`.
pub fn load_dataset(data_dir: &Path) -> Result<Dataset, TiaError> {
    let dataset = Dataset {
        mechanical: read_mechanical(open_table(data_dir, Table::Mechanical)?)?,
        microstructure: read_microstructure(open_table(data_dir, Table::Microstructure)?)?,
        composition: read_composition(open_table(data_dir, Table::Composition)?)?,
        metadata: read_metadata(open_table(data_dir, Table::Metadata)?)?,
    };
    info!(
        data_dir = %data_dir.display(),
        mechanical = dataset.mechanical.len(),
        microstructure = dataset.microstructure.len(),
        composition = dataset.composition.len(),
        metadata = dataset.metadata.len(),
        "dataset loaded"
    );
    Ok(dataset)
}
