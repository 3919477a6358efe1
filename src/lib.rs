//! `fias-delta-report` library crate.
//!
//! The binary (`fias-report`) is a thin wrapper around this library so that:
//!
//! - the catalog/scan/render stages are testable without a network
//! - the pipeline stays easy to navigate as a linear sequence of modules

pub mod app;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
