//! Zip extraction for the downloaded delta archive.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::AppError;

/// Extract `archive` into `dest`.
///
/// Unpacks into `<dest>.tmp` first and renames into place, so a crash
/// mid-extraction never leaves a directory that later runs would trust as a
/// complete extraction. The caller is expected to have checked that `dest`
/// does not already exist.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<(), AppError> {
    let file = File::open(archive)
        .map_err(|e| AppError::fs(format!("Failed to open archive '{}': {e}", archive.display())))?;
    let mut zip = ZipArchive::new(file)
        .map_err(|e| AppError::fs(format!("Invalid zip archive '{}': {e}", archive.display())))?;

    let tmp = staging_path(dest);
    if tmp.exists() {
        // Leftover from an interrupted run.
        fs::remove_dir_all(&tmp)
            .map_err(|e| AppError::fs(format!("Failed to remove '{}': {e}", tmp.display())))?;
    }

    zip.extract(&tmp)
        .map_err(|e| AppError::fs(format!("Failed to extract '{}': {e}", archive.display())))?;

    fs::rename(&tmp, dest).map_err(|e| {
        AppError::fs(format!(
            "Failed to move extracted data into '{}': {e}",
            dest.display()
        ))
    })
}

fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_test_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        zip.add_directory("01", options).unwrap();
        zip.start_file("01/AS_ADDR_OBJ_20240305.XML", options).unwrap();
        zip.write_all(b"<ADDRESSOBJECTS/>").unwrap();
        zip.start_file("AS_OBJECT_LEVELS_20240305.XML", options).unwrap();
        zip.write_all(b"<OBJECTLEVELS/>").unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn extracts_tree_and_leaves_no_staging_dir() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("delta.zip");
        write_test_zip(&archive);

        let dest = dir.path().join("fias_delta_xml");
        extract_archive(&archive, &dest).unwrap();

        assert!(dest.join("AS_OBJECT_LEVELS_20240305.XML").is_file());
        assert!(dest.join("01").join("AS_ADDR_OBJ_20240305.XML").is_file());
        assert!(!staging_path(&dest).exists());
    }

    #[test]
    fn rejects_a_file_that_is_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("delta.zip");
        fs::write(&archive, b"not a zip").unwrap();

        let err = extract_archive(&archive, &dir.path().join("out")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
