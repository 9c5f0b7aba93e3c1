use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::Args;
use tia_plot::{embedded_rows, read_plot_rows, render_figures, PlotConfig};
use tracing::debug;

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Optional YAML plot configuration (output directory, figure size).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// CSV with alloy_id, phase_class, YS_MPa, UTS_MPa and elong_% columns.
    /// Defaults to the built-in dataset.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Output directory for the SVG figures.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &PlotArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    if let Some(out) = &args.out {
        config.out_dir = out.clone();
    }
    let rows = match &args.input {
        Some(path) => read_plot_rows(File::open(path)?)?,
        None => embedded_rows()?,
    };
    debug!(rows = rows.len(), embedded = args.input.is_none(), "plot rows loaded");
    let manifest = render_figures(&rows, &config)?;
    for figure in &manifest.figures {
        println!("wrote {}", figure.display());
    }
    Ok(())
}
