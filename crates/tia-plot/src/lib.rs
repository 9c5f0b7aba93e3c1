//! Scatter figures of strength and ductility grouped by phase class.

pub mod build;
pub mod dataset;
pub mod figures;

pub use build::{render_figures, uts_vs_elongation, yield_vs_uts, PlotConfig, PlotManifest};
pub use dataset::{embedded_rows, group_by_phase, read_plot_rows, PlotRow, EMBEDDED_CSV};
pub use figures::{render_scatter_svg, FigureConfig, ScatterFigure};
