//! Address scan and level aggregation.
//!
//! This is the one stage with real data-shape decisions: which records
//! qualify, how they group, and what is tolerated versus fatal. The rules,
//! in scan order per element:
//!
//! - only `ISACTIVE="1"` records qualify
//! - `LEVEL`, `NAME`, `TYPENAME` are all required; missing any → skip
//! - a non-numeric `LEVEL` is fatal (corrupt export, not a bad row)
//! - excluded levels are dropped
//! - everything else lands in its level's group, in scan order

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AddressGroups, AddressRecord, FilePattern, ReportConfig};
use crate::error::AppError;
use crate::io::xml;

const OBJECT_TAG: &[u8] = b"OBJECT";
const ATTR_ACTIVE: &[u8] = b"ISACTIVE";
const ATTR_LEVEL: &[u8] = b"LEVEL";
const ATTR_NAME: &[u8] = b"NAME";
const ATTR_TYPE: &[u8] = b"TYPENAME";

/// Aggregate every address file under `root` into level groups.
///
/// Directories are visited in filesystem-enumeration order; the result is a
/// multiset union over all files, so ordering only becomes observable once
/// the renderer sorts each group.
pub fn scan_addresses(root: &Path, config: &ReportConfig) -> Result<AddressGroups, AppError> {
    let mut groups = AddressGroups::new();
    for dir in collect_dirs(root)? {
        // Not every region directory ships addresses in a given delta.
        let Some(file) = first_match(&dir, &config.address_file)? else {
            continue;
        };
        scan_address_file(&file, config, &mut groups)?;
    }
    Ok(groups)
}

/// Every directory at any depth under `root`, excluding `root` itself.
fn collect_dirs(root: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut dirs = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .map_err(|e| AppError::fs(format!("Failed to read '{}': {e}", dir.display())))?;
        for entry in entries {
            let entry = entry
                .map_err(|e| AppError::fs(format!("Failed to read '{}': {e}", dir.display())))?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path.clone());
                pending.push(path);
            }
        }
    }
    Ok(dirs)
}

/// First file in `dir` matching `pattern`, in enumeration order.
fn first_match(dir: &Path, pattern: &FilePattern) -> Result<Option<PathBuf>, AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::fs(format!("Failed to read '{}': {e}", dir.display())))?;

    for entry in entries {
        let entry =
            entry.map_err(|e| AppError::fs(format!("Failed to read '{}': {e}", dir.display())))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if pattern.matches(name) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

fn scan_address_file(
    path: &Path,
    config: &ReportConfig,
    groups: &mut AddressGroups,
) -> Result<(), AppError> {
    xml::for_each_element(path, OBJECT_TAG, |e| {
        if xml::attr(e, ATTR_ACTIVE)?.as_deref() != Some("1") {
            return Ok(());
        }

        let (Some(level), Some(name), Some(type_name)) = (
            xml::attr(e, ATTR_LEVEL)?,
            xml::attr(e, ATTR_NAME)?,
            xml::attr(e, ATTR_TYPE)?,
        ) else {
            return Ok(());
        };

        let level: u32 = level.parse().map_err(|_| {
            AppError::data(format!(
                "Non-numeric LEVEL '{level}' in '{}'.",
                path.display()
            ))
        })?;

        if config.is_excluded(level) {
            return Ok(());
        }

        groups
            .entry(level)
            .or_default()
            .push(AddressRecord { name, type_name });
        Ok(())
    })
}
