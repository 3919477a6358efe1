//! Level catalog loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{LevelCatalog, ReportConfig};
use crate::error::AppError;
use crate::io::xml;

const LEVEL_TAG: &[u8] = b"OBJECTLEVEL";
const ATTR_LEVEL: &[u8] = b"LEVEL";
const ATTR_NAME: &[u8] = b"NAME";

/// Load the level catalog from the extraction root.
///
/// The catalog file sits directly in the root, not inside the per-region
/// directories. A delta without one cannot be reported on at all, so a
/// missing file is fatal; individual entries missing either attribute are
/// tolerated and skipped.
pub fn load_level_catalog(root: &Path, config: &ReportConfig) -> Result<LevelCatalog, AppError> {
    let path = find_catalog_file(root, config)?;

    let mut catalog = LevelCatalog::new();
    xml::for_each_element(&path, LEVEL_TAG, |e| {
        let (Some(level), Some(name)) = (xml::attr(e, ATTR_LEVEL)?, xml::attr(e, ATTR_NAME)?)
        else {
            return Ok(());
        };
        let code: u32 = level.parse().map_err(|_| {
            AppError::data(format!(
                "Non-numeric level code '{level}' in catalog '{}'.",
                path.display()
            ))
        })?;
        // Last write wins on duplicate codes.
        catalog.insert(code, name);
        Ok(())
    })?;

    Ok(catalog)
}

fn find_catalog_file(root: &Path, config: &ReportConfig) -> Result<PathBuf, AppError> {
    let entries = fs::read_dir(root)
        .map_err(|e| AppError::fs(format!("Failed to read '{}': {e}", root.display())))?;

    for entry in entries {
        let entry =
            entry.map_err(|e| AppError::fs(format!("Failed to read '{}': {e}", root.display())))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if config.levels_file.matches(name) {
            return Ok(entry.path());
        }
    }

    Err(AppError::data(format!(
        "No level catalog ({}) found in '{}'.",
        config.levels_file,
        root.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_catalog(root: &Path, body: &str) {
        fs::write(
            root.join("AS_OBJECT_LEVELS_20240305.XML"),
            format!("<OBJECTLEVELS>{body}</OBJECTLEVELS>"),
        )
        .unwrap();
    }

    #[test]
    fn loads_code_to_name_mapping() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            r#"<OBJECTLEVEL LEVEL="1" NAME="Регион"/><OBJECTLEVEL LEVEL="8" NAME="Улица"/>"#,
        );

        let catalog = load_level_catalog(dir.path(), &ReportConfig::default()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[&1], "Регион");
        assert_eq!(catalog[&8], "Улица");
    }

    #[test]
    fn later_entries_overwrite_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            r#"<OBJECTLEVEL LEVEL="1" NAME="Старое"/><OBJECTLEVEL LEVEL="1" NAME="Новое"/>"#,
        );

        let catalog = load_level_catalog(dir.path(), &ReportConfig::default()).unwrap();
        assert_eq!(catalog[&1], "Новое");
    }

    #[test]
    fn entries_missing_an_attribute_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            r#"<OBJECTLEVEL LEVEL="1"/><OBJECTLEVEL NAME="Без кода"/><OBJECTLEVEL LEVEL="2" NAME="Округ"/>"#,
        );

        let catalog = load_level_catalog(dir.path(), &ReportConfig::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[&2], "Округ");
    }

    #[test]
    fn non_numeric_level_code_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), r#"<OBJECTLEVEL LEVEL="one" NAME="Регион"/>"#);

        let err = load_level_catalog(dir.path(), &ReportConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_catalog_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_level_catalog(dir.path(), &ReportConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn catalog_is_not_picked_up_from_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("01");
        fs::create_dir(&sub).unwrap();
        write_catalog(&sub, r#"<OBJECTLEVEL LEVEL="1" NAME="Регион"/>"#);

        assert!(load_level_catalog(dir.path(), &ReportConfig::default()).is_err());
    }
}
