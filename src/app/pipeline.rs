//! Offline portion of the pipeline: extracted tree -> rendered report.
//!
//! Keeping this behind its own seam means tests can drive the whole
//! catalog + scan + render path against a synthetic extraction tree,
//! without any network or archive handling in the way.

use std::path::Path;

use chrono::NaiveDate;

use crate::domain::ReportConfig;
use crate::error::AppError;
use crate::io::{levels, scan};
use crate::report::{RenderedReport, render_report};

/// Build the report document from an already-extracted delta tree.
pub fn render_from_tree(
    root: &Path,
    config: &ReportConfig,
    report_date: NaiveDate,
) -> Result<RenderedReport, AppError> {
    let catalog = levels::load_level_catalog(root, config)?;
    let groups = scan::scan_addresses(root, config)?;
    Ok(render_report(&catalog, &groups, report_date))
}
