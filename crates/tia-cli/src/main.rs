use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    export::{self, ExportArgs},
    plot::{self, PlotArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "tia", about = "Titanium alloy dataset toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join the four CSV tables and write one JSON document per alloy.
    Export(ExportArgs),
    /// Render strength/ductility scatter figures grouped by phase class.
    Plot(PlotArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_logging()?;
    let cli = Cli::parse();
    match cli.command {
        Command::Export(args) => export::run(&args),
        Command::Plot(args) => plot::run(&args),
    }
}
