use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn write_tables(dir: &std::path::Path) {
    fs::create_dir_all(dir).expect("data dir");
    fs::write(
        dir.join("mechanical.csv"),
        "alloy_id,phase_class,YS_MPa,UTS_MPa,elong_%,hardness_value,hardness_scale,test_temp_K,strain_rate_s-1\n\
         Ti64,alpha+beta,900,1000,14,330,HV,298,0.001\n\
         Partial,beta,700,800,20,250,HV,298,0.001\n",
    )
    .expect("mechanical");
    fs::write(
        dir.join("microstructure.csv"),
        "alloy_id,phases_reported,shape,vol_fr,grain_size_um,phase_id_method\n\
         Ti64,alpha,equiaxed,0.9,10,EBSD\n\
         Partial,beta,equiaxed,1.0,50,OM\n",
    )
    .expect("microstructure");
    fs::write(
        dir.join("composition.csv"),
        "alloy_id,element,wt%\nTi64,Ti,90\nTi64,Al,6\nTi64,V,4\nPartial,Ti,100\n",
    )
    .expect("composition");
    fs::write(
        dir.join("metadata.csv"),
        "alloy_id,DOI,source_type,data_location,processing_history,test_standard\n\
         Ti64,10.1000/x,journal,Table 1,annealed,ASTM E8\n",
    )
    .expect("metadata");
}

#[test]
fn export_prints_status_line() {
    let root = tempdir().expect("root");
    let data = root.path().join("data");
    let out = root.path().join("out");
    write_tables(&data);
    let output = Command::new(env!("CARGO_BIN_EXE_tia"))
        .arg("export")
        .arg("--data-dir")
        .arg(&data)
        .arg("--out-dir")
        .arg(&out)
        .output()
        .expect("run tia export");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout.trim_end(),
        format!("Generated 1 JSON files in '{}'", out.display())
    );
    assert!(out.join("Ti64.json").exists());
    assert!(!out.join("Partial.json").exists());
}

#[test]
fn export_fails_on_missing_tables() {
    let root = tempdir().expect("root");
    let output = Command::new(env!("CARGO_BIN_EXE_tia"))
        .arg("export")
        .arg("--data-dir")
        .arg(root.path())
        .arg("--out-dir")
        .arg(root.path().join("out"))
        .output()
        .expect("run tia export");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("mechanical.csv"));
}

#[test]
fn plot_writes_svg_files() {
    let root = tempdir().expect("root");
    let out = root.path().join("figures");
    let status = Command::new(env!("CARGO_BIN_EXE_tia"))
        .arg("plot")
        .arg("--out")
        .arg(&out)
        .status()
        .expect("run tia plot");
    assert!(status.success());
    assert!(out.join("uts_vs_elongation.svg").exists());
    assert!(out.join("ys_vs_uts.svg").exists());
}
