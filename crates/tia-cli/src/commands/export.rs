use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use tia_data::{export_documents, ExportConfig};
use tracing::debug;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Optional YAML export configuration (directories, extra atomic weights).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory containing mechanical, microstructure, composition and metadata CSVs.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Output directory for per-alloy JSON documents.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

pub fn resolve_config(args: &ExportArgs) -> Result<ExportConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ExportConfig::load(path)?,
        None => ExportConfig::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(out_dir) = &args.out_dir {
        config.out_dir = out_dir.clone();
    }
    Ok(config)
}

pub fn run(args: &ExportArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    debug!(
        data_dir = %config.data_dir.display(),
        out_dir = %config.out_dir.display(),
        "export config resolved"
    );
    let summary = export_documents(&config)?;
    println!("{}", summary.status_line());
    Ok(())
}
