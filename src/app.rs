//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - fetches the latest publication metadata
//! - downloads and extracts the delta archive (both cache-aware)
//! - aggregates address records by level
//! - writes the HTML report

use crate::data::registry::RegistryClient;
use crate::domain::ReportConfig;
use crate::error::AppError;
use crate::io::archive;

pub mod pipeline;

/// Entry point for the `fias-report` binary.
pub fn run() -> Result<(), AppError> {
    run_with_config(&ReportConfig::default())
}

/// Run the full pipeline under an explicit configuration.
pub fn run_with_config(config: &ReportConfig) -> Result<(), AppError> {
    let client = RegistryClient::new(&config.metadata_url);
    let info = client.fetch_delta_info()?;

    let Some(url) = info.published_url() else {
        println!("No delta download link is published; nothing to report.");
        return Ok(());
    };

    let archive_path = config.archive_path(info.date);
    if archive_path.exists() {
        println!("Latest delta archive already downloaded.");
    } else {
        client.download_archive(url, &archive_path)?;
        println!("Delta archive downloaded.");
    }

    let extract_dir = config.extract_dir();
    if extract_dir.exists() {
        println!("Reusing previously extracted data.");
    } else {
        archive::extract_archive(&archive_path, &extract_dir)?;
        println!("Delta archive extracted.");
    }

    let rendered = pipeline::render_from_tree(&extract_dir, config, info.date)?;
    for level in &rendered.unknown_levels {
        eprintln!("warning: level {level} has no catalog entry; section skipped");
    }

    let report_path = config.report_path();
    crate::report::write_report(&report_path, &rendered.html)?;
    println!("Report written: {}", report_path.display());

    Ok(())
}
