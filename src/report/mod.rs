//! Report rendering and output.

use std::fs;
use std::path::Path;

use crate::error::AppError;

pub mod html;

pub use html::{RenderedReport, render_report};

/// Write the rendered document to `path`, overwriting any previous report.
pub fn write_report(path: &Path, html: &str) -> Result<(), AppError> {
    fs::write(path, html)
        .map_err(|e| AppError::fs(format!("Failed to write report '{}': {e}", path.display())))
}
