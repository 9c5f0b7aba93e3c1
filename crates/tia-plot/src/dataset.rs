//! Strength/ductility rows for the phase-class scatter plots.

use std::collections::BTreeMap;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tia_core::errors::{ErrorInfo, TiaError};
use tia_data::clean::clean_cell;
use tia_data::ingest::normalize_header;
use tracing::warn;

/// Literature values for common titanium alloys, grouped by phase class.
pub const EMBEDDED_CSV: &str = "\
alloy_id,phase_class,YS_MPa,UTS_MPa,elong_%
T6A4V_ar_A,alpha,979,1051,8.7
T6A4V_93060AC,alpha,1107,1186,12.6
T6A4V_96030AC,alpha,1122,1201,12.1
T6A4V_ar_B,alpha,886,997,14.7
T6A4V_91030WQ_580300AC,alpha,1025,1087,9.1
T6A4VO_925240FC,alpha,1108.5,1211.3,9.1
T6A4VO_955120WQ_550300AC,alpha,1352.4,1421.7,7.2
T6C5M5V4A_800120AC_600720AC,alpha,1181,1205,13.2
T6C5M5V4A_800120AC_550720AC,alpha,1241,1288,7.6
T6C5M5V4A_800120AC_450720AC,alpha,1368,1433,5.5
Ti55511_AM650,alpha,935,1042,19
Ti55511_AM750,alpha,1105,1178,8
IMI 834,Near-alpha,950,1060,9
Ti-1100,Near-alpha,920,1000,10
Ti-6Al-4V_ELI,alpha+beta,835,912,12.5
Ti-15Mo,beta,544,874,82
";

const REQUIRED: [&str; 5] = ["alloy_id", "phase_class", "YS_MPa", "UTS_MPa", "elong_pct"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRow {
    pub alloy_id: String,
    pub phase_class: String,
    pub ys_mpa: Option<f64>,
    pub uts_mpa: Option<f64>,
    pub elong_pct: Option<f64>,
}

fn plot_error(code: &str, err: impl ToString) -> TiaError {
    TiaError::Input(ErrorInfo::new(code, err.to_string()).with_context("table", "plot"))
}

/// Parses plot rows, cleaning the three numeric columns.
pub fn read_plot_rows<R: Read>(reader: R) -> Result<Vec<PlotRow>, TiaError> {
    let mut csv = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = csv
        .headers()
        .map_err(|err| plot_error("tia_plot.csv_header", err))?
        .iter()
        .map(normalize_header)
        .collect();
    let mut positions = [0usize; REQUIRED.len()];
    for (slot, name) in positions.iter_mut().zip(REQUIRED) {
        *slot = headers.iter().position(|h| h == name).ok_or_else(|| {
            TiaError::Schema(
                ErrorInfo::new("tia_plot.missing_column", format!("plot data missing {name} column"))
                    .with_context("table", "plot")
                    .with_context("column", name),
            )
        })?;
    }
    let [id_pos, phase_pos, ys_pos, uts_pos, elong_pos] = positions;

    let mut rows = Vec::new();
    for result in csv.records() {
        let record = result.map_err(|err| plot_error("tia_plot.csv_read", err))?;
        let cell = |pos: usize| record.get(pos).filter(|cell| !cell.is_empty());
        let Some(alloy_id) = cell(id_pos) else {
            warn!("skipping plot row without alloy_id");
            continue;
        };
        rows.push(PlotRow {
            alloy_id: alloy_id.to_string(),
            phase_class: cell(phase_pos).unwrap_or("unclassified").to_string(),
            ys_mpa: clean_cell(cell(ys_pos)),
            uts_mpa: clean_cell(cell(uts_pos)),
            elong_pct: clean_cell(cell(elong_pos)),
        });
    }
    Ok(rows)
}

/// Rows of the embedded dataset.
pub fn embedded_rows() -> Result<Vec<PlotRow>, TiaError> {
    read_plot_rows(EMBEDDED_CSV.as_bytes())
}

/// Groups rows by phase class in sorted order.
pub fn group_by_phase(rows: &[PlotRow]) -> BTreeMap<&str, Vec<&PlotRow>> {
    let mut groups: BTreeMap<&str, Vec<&PlotRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.phase_class.as_str()).or_default().push(row);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_parses() {
        let rows = embedded_rows().unwrap();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[12].alloy_id, "IMI 834");
        assert_eq!(rows[15].elong_pct, Some(82.0));
        assert_eq!(rows[5].ys_mpa, Some(1108.5));
    }

    #[test]
    fn groups_are_sorted_by_phase() {
        let rows = embedded_rows().unwrap();
        let groups = group_by_phase(&rows);
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["Near-alpha", "alpha", "alpha+beta", "beta"]);
        assert_eq!(groups["alpha"].len(), 12);
    }

    #[test]
    fn ranges_and_markers_are_cleaned() {
        let csv = "alloy_id,phase_class,YS_MPa,UTS_MPa,elong_%\nX,beta,9-11,not reported,12.1\n";
        let rows = read_plot_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].ys_mpa, Some(10.0));
        assert_eq!(rows[0].uts_mpa, None);
        assert_eq!(rows[0].elong_pct, Some(12.1));
    }
}
