use std::fs;

use tempfile::tempdir;
use tia_plot::build::{UTS_VS_ELONGATION_FILE, YS_VS_UTS_FILE};
use tia_plot::{embedded_rows, render_figures, PlotConfig};

#[test]
fn render_writes_both_figures() {
    let out = tempdir().expect("out");
    let config = PlotConfig {
        out_dir: out.path().join("figures"),
        ..PlotConfig::default()
    };
    let rows = embedded_rows().expect("rows");
    let manifest = render_figures(&rows, &config).expect("render");
    assert_eq!(manifest.figures.len(), 2);
    assert!(config.out_dir.join(UTS_VS_ELONGATION_FILE).exists());
    let first = fs::read(config.out_dir.join(YS_VS_UTS_FILE)).expect("svg");
    render_figures(&rows, &config).expect("render again");
    let second = fs::read(config.out_dir.join(YS_VS_UTS_FILE)).expect("svg");
    assert_eq!(first, second);
}

#[test]
fn plot_config_reads_yaml() {
    let dir = tempdir().expect("dir");
    let path = dir.path().join("plot.yaml");
    fs::write(&path, "out_dir: charts\nfigure:\n  width: 800\n  height: 500\n  marker_radius: 4.0\n")
        .expect("write");
    let config = PlotConfig::load(&path).expect("load");
    assert_eq!(config.out_dir, std::path::PathBuf::from("charts"));
    assert_eq!(config.figure.width, 800);
    assert_eq!(config.figure.marker_radius, 4.0);
}
