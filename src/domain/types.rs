//! Shared domain types.
//!
//! Everything the pipeline passes between stages lives here, plus the run
//! configuration that replaces the usual pile of module-level constants so
//! tests can inject their own paths and exclusion sets.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use chrono::NaiveDate;

/// Date format used on the wire and in on-disk artifact names (`dd.MM.yyyy`).
pub const WIRE_DATE_FORMAT: &str = "%d.%m.%Y";

/// One qualifying address object from the registry export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub name: String,
    pub type_name: String,
}

/// Level code -> display name, loaded from the catalog file.
pub type LevelCatalog = BTreeMap<u32, String>;

/// Level code -> records in scan order.
///
/// Groups are kept unsorted until render time; the `BTreeMap` only fixes the
/// section order so repeated runs produce identical reports.
pub type AddressGroups = BTreeMap<u32, Vec<AddressRecord>>;

/// File-name pattern of the form `<prefix>*<suffix>`.
///
/// This is all the registry's naming scheme needs; the suffix compares
/// case-insensitively because exports have shipped both `.XML` and `.xml`.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pub prefix: String,
    pub suffix: String,
}

impl FilePattern {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        if file_name.len() < self.prefix.len() + self.suffix.len() {
            return false;
        }
        file_name.starts_with(&self.prefix)
            && file_name
                .get(file_name.len() - self.suffix.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(&self.suffix))
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*{}", self.prefix, self.suffix)
    }
}

/// Run configuration: endpoint, on-disk layout, and report scope.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Metadata endpoint returning the latest publication descriptor.
    pub metadata_url: String,
    /// Directory holding the archive cache, the extraction, and the report.
    pub work_dir: PathBuf,
    /// Archive cache files are named `<archive_prefix><dd.MM.yyyy>.zip`.
    pub archive_prefix: String,
    pub extract_dir_name: String,
    /// Catalog file sitting directly in the extraction root.
    pub levels_file: FilePattern,
    /// Per-region address export, at most one per directory.
    pub address_file: FilePattern,
    /// Administrative levels deliberately left out of the report.
    pub excluded_levels: HashSet<u32>,
    pub report_file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            metadata_url: "https://fias.nalog.ru/WebServices/Public/GetLastDownloadFileInfo"
                .to_string(),
            work_dir: PathBuf::from("."),
            archive_prefix: "fias-".to_string(),
            extract_dir_name: "fias_delta_xml".to_string(),
            levels_file: FilePattern::new("AS_OBJECT_LEVELS_", ".XML"),
            address_file: FilePattern::new("AS_ADDR_OBJ_", ".XML"),
            excluded_levels: [9, 11, 12, 17].into_iter().collect(),
            report_file_name: "report.html".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn archive_path(&self, date: NaiveDate) -> PathBuf {
        self.work_dir.join(format!(
            "{}{}.zip",
            self.archive_prefix,
            date.format(WIRE_DATE_FORMAT)
        ))
    }

    pub fn extract_dir(&self) -> PathBuf {
        self.work_dir.join(&self.extract_dir_name)
    }

    pub fn report_path(&self) -> PathBuf {
        self.work_dir.join(&self.report_file_name)
    }

    pub fn is_excluded(&self, level: u32) -> bool {
        self.excluded_levels.contains(&level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_matches_prefix_and_suffix() {
        let p = FilePattern::new("AS_ADDR_OBJ_", ".XML");
        assert!(p.matches("AS_ADDR_OBJ_20240305_abc.XML"));
        assert!(p.matches("AS_ADDR_OBJ_20240305_abc.xml"));
        assert!(!p.matches("AS_HOUSES_20240305_abc.XML"));
        assert!(!p.matches("AS_ADDR_OBJ_20240305_abc.TXT"));
    }

    #[test]
    fn pattern_rejects_names_shorter_than_fixed_parts() {
        let p = FilePattern::new("AS_ADDR_OBJ_", ".XML");
        // Prefix and suffix must not overlap within the name.
        assert!(!p.matches("AS_ADDR_OBJ_"));
        assert!(!p.matches(".XML"));
        assert!(p.matches("AS_ADDR_OBJ_.XML"));
    }

    #[test]
    fn archive_path_uses_wire_date_format() {
        let config = ReportConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            config.archive_path(date),
            PathBuf::from("./fias-05.03.2024.zip")
        );
    }

    #[test]
    fn default_exclusions_cover_out_of_scope_levels() {
        let config = ReportConfig::default();
        for level in [9, 11, 12, 17] {
            assert!(config.is_excluded(level));
        }
        assert!(!config.is_excluded(1));
        assert!(!config.is_excluded(8));
    }
}
