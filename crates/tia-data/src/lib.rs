//! Ingest, cleaning, composition conversion and per-alloy JSON export for
//! titanium alloy datasets.

pub mod clean;
pub mod composition;
pub mod config;
pub mod document;
pub mod export;
pub mod ingest;
pub mod schema;
pub mod serde;

pub use clean::clean_numeric;
pub use composition::{atomic_percent, compute_compositions, Composition, ElementFraction};
pub use config::ExportConfig;
pub use document::AlloyDocument;
pub use export::{
    assemble_documents, export_documents, join_ids, write_documents, ExportSummary, JoinOutcome,
};
pub use ingest::{
    load_dataset, read_composition, read_mechanical, read_metadata, read_microstructure,
};
pub use schema::{
    CompositionRecord, Dataset, MechanicalRecord, MetadataRecord, MicrostructureRecord, Table,
    WithTable,
};
