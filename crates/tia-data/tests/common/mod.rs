#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const MECHANICAL: &str = "\
alloy_id,phase_class,YS_MPa,UTS_MPa,elong_%,hardness_value,hardness_scale,test_temp_K,strain_rate_s-1
Ti64_A,alpha+beta,880-920,1000,14,330,HV,298,1e-3
TiAl_B,alpha,900,1010,not reported,,,298,0.001
Orphan_C,beta,700,800,20,250,HV,298,0.001
";

pub const MICROSTRUCTURE: &str = "\
alloy_id,phases_reported,shape,vol_fr,grain_size_um,phase_id_method
Ti64_A,alpha,equiaxed,0.6,12,EBSD
Ti64_A,beta,lamellar,0.4,3\u{2013}5,XRD
TiAl_B,alpha,equiaxed,1.0,not reported,OM
Orphan_C,beta,equiaxed,1.0,50,OM
";

pub const COMPOSITION: &str = "\
alloy_id,element,wt%
Ti64_A,Ti,90
Ti64_A,Al,6
Ti64_A,V,4
TiAl_B,Ti,90
TiAl_B, Al ,10
Orphan_C,Ti,85
Orphan_C,Mo,15
";

pub const METADATA: &str = "\
alloy_id,DOI,source_type,data_location,processing_history,test_standard
Ti64_A,10.1000/ti64,journal,Table 2,mill annealed,ASTM E8
TiAl_B,10.1000/tial,thesis,Fig. 3,as-cast,
";

pub fn write_dataset(dir: &Path) {
    write_tables(dir, MECHANICAL, MICROSTRUCTURE, COMPOSITION, METADATA);
}

pub fn write_tables(dir: &Path, mech: &str, micro: &str, comp: &str, meta: &str) {
    fs::create_dir_all(dir).expect("data dir");
    fs::write(dir.join("mechanical.csv"), mech).expect("mechanical");
    fs::write(dir.join("microstructure.csv"), micro).expect("microstructure");
    fs::write(dir.join("composition.csv"), comp).expect("composition");
    fs::write(dir.join("metadata.csv"), meta).expect("metadata");
}
