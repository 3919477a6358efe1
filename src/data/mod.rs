//! External registry service access.

pub mod registry;

pub use registry::*;
