#![deny(missing_docs)]
#![doc = "Shared error types, configuration helpers and element data for the titanium alloy toolkit."]

pub mod config;
pub mod elements;
pub mod errors;

pub use config::{from_yaml_str, load_yaml};
pub use elements::{AtomicWeights, STANDARD_ATOMIC_WEIGHTS};
pub use errors::{ErrorInfo, TiaError};
