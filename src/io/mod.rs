//! Input/output stages.
//!
//! - zip extraction (`archive`)
//! - level catalog loading (`levels`)
//! - address scan + aggregation (`scan`)
//! - shared quick-xml helpers (`xml`)

pub mod archive;
pub mod levels;
pub mod scan;
pub mod xml;
