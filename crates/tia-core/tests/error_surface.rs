use std::path::Path;

use tia_core::errors::{ErrorInfo, TiaError};
use tia_core::AtomicWeights;

#[test]
fn unknown_element_names_element_and_hint() {
    let err = AtomicWeights::default().require("Hf").unwrap_err();
    assert_eq!(err.family(), "composition");
    assert_eq!(err.code(), "tia_core.atomic_weight_missing");
    assert_eq!(err.info().context["element"], "Hf");
    assert!(err.info().hint.is_some());
}

#[test]
fn context_builders_use_fixed_keys() {
    let info = ErrorInfo::new("tia_data.zero_moles", "total molar quantity is 0")
        .with_alloy("Ti64")
        .with_element("Ti")
        .with_path(Path::new("data/composition.csv"));
    assert_eq!(info.context["alloy_id"], "Ti64");
    assert_eq!(info.context["element"], "Ti");
    assert_eq!(info.context["path"], "data/composition.csv");
}

#[test]
fn display_lists_code_context_and_hint() {
    let err = TiaError::Schema(
        ErrorInfo::new("tia_data.missing_column", "mechanical.csv missing UTS_MPa column")
            .with_context("table", "mechanical")
            .with_context("column", "UTS_MPa")
            .with_hint("check the header row"),
    );
    assert_eq!(
        err.to_string(),
        "schema error: mechanical.csv missing UTS_MPa column [tia_data.missing_column] \
         (column=UTS_MPa, table=mechanical) hint: check the header row"
    );
}

#[test]
fn display_without_context_is_message_and_code() {
    let err = TiaError::Join(ErrorInfo::new(
        "tia_data.no_common_ids",
        "No common alloy_id across all CSVs",
    ));
    assert_eq!(
        err.to_string(),
        "join error: No common alloy_id across all CSVs [tia_data.no_common_ids]"
    );
    assert_eq!(err.family(), "join");
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = TiaError::Output(
        ErrorInfo::new("tia_data.json_write", "permission denied")
            .with_path(Path::new("out/Ti64.json")),
    );
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Output");
    assert_eq!(json["detail"]["code"], "tia_data.json_write");
    assert_eq!(json["detail"]["context"]["path"], "out/Ti64.json");
    assert!(json["detail"].get("hint").is_none());
    let back: TiaError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, err);
}
