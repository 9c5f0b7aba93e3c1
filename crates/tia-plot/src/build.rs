use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tia_core::errors::{ErrorInfo, TiaError};
use tracing::{debug, info};

use crate::dataset::{group_by_phase, PlotRow};
use crate::figures::{render_scatter_svg, FigureConfig, ReferenceLine, ScatterFigure, Series};

pub const UTS_VS_ELONGATION_FILE: &str = "uts_vs_elongation.svg";
pub const YS_VS_UTS_FILE: &str = "ys_vs_uts.svg";

/// YAML-configurable settings for the plot run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default)]
    pub figure: FigureConfig,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("figures")
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            figure: FigureConfig::default(),
        }
    }
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self, TiaError> {
        tia_core::load_yaml(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotManifest {
    pub figures: Vec<PathBuf>,
}

fn series_by_phase<F>(rows: &[PlotRow], coords: F) -> Vec<Series>
where
    F: Fn(&PlotRow) -> (Option<f64>, Option<f64>),
{
    group_by_phase(rows)
        .into_iter()
        .map(|(phase, members)| Series {
            label: phase.to_string(),
            points: members
                .into_iter()
                .filter_map(|row| match coords(row) {
                    (Some(x), Some(y)) => Some((x, y)),
                    _ => None,
                })
                .collect(),
        })
        .collect()
}

/// UTS against elongation, one series per phase class.
pub fn uts_vs_elongation(rows: &[PlotRow]) -> ScatterFigure {
    ScatterFigure {
        title: "Titanium Alloy Performance: UTS vs. Elongation".into(),
        x_label: "Elongation (%)".into(),
        y_label: "UTS (MPa)".into(),
        legend_title: Some("Phase Class".into()),
        series: series_by_phase(rows, |row| (row.elong_pct, row.uts_mpa)),
        reference: None,
    }
}

/// Yield strength against UTS with a `YS = UTS` guide running from 90% of
/// the lowest yield strength to 110% of the highest UTS.
pub fn yield_vs_uts(rows: &[PlotRow]) -> ScatterFigure {
    let min_ys = rows
        .iter()
        .filter_map(|row| row.ys_mpa)
        .fold(f64::INFINITY, f64::min);
    let max_uts = rows
        .iter()
        .filter_map(|row| row.uts_mpa)
        .fold(f64::NEG_INFINITY, f64::max);
    let reference = (min_ys.is_finite() && max_uts.is_finite()).then(|| {
        let lo = min_ys * 0.9;
        let hi = max_uts * 1.1;
        ReferenceLine {
            label: "YS = UTS".into(),
            from: (lo, lo),
            to: (hi, hi),
            color: "#ff0000".into(),
        }
    });
    ScatterFigure {
        title: "Strength Comparison: Yield vs. UTS".into(),
        x_label: "Yield Strength (MPa)".into(),
        y_label: "Ultimate Tensile Strength (MPa)".into(),
        legend_title: None,
        series: series_by_phase(rows, |row| (row.ys_mpa, row.uts_mpa)),
        reference,
    }
}

/// Renders both figures and writes them into `config.out_dir`.
pub fn render_figures(rows: &[PlotRow], config: &PlotConfig) -> Result<PlotManifest, TiaError> {
    fs::create_dir_all(&config.out_dir).map_err(|err| {
        TiaError::Output(
            ErrorInfo::new("tia_plot.output_dir", err.to_string()).with_path(&config.out_dir),
        )
    })?;
    let figures = [
        (UTS_VS_ELONGATION_FILE, uts_vs_elongation(rows)),
        (YS_VS_UTS_FILE, yield_vs_uts(rows)),
    ];
    let mut written = Vec::with_capacity(figures.len());
    for (name, figure) in &figures {
        let path = config.out_dir.join(name);
        let svg = render_scatter_svg(figure, &config.figure);
        fs::write(&path, svg.as_bytes()).map_err(|err| {
            TiaError::Output(
                ErrorInfo::new("tia_plot.write", err.to_string()).with_path(&path),
            )
        })?;
        debug!(path = %path.display(), series = figure.series.len(), "figure written");
        written.push(path);
    }
    info!(figures = written.len(), out_dir = %config.out_dir.display(), "plots rendered");
    Ok(PlotManifest { figures: written })
}
