//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the run configuration (`ReportConfig`, `FilePattern`)
//! - aggregation shapes (`AddressRecord`, `LevelCatalog`, `AddressGroups`)

pub mod types;

pub use types::*;
