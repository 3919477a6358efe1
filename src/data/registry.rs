//! Registry service integration: publication metadata and archive download.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Latest-publication descriptor returned by the metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaInfo {
    /// Absent, null, or empty when no delta archive is currently published.
    #[serde(default, rename = "GarXMLDeltaURL")]
    pub delta_url: Option<String>,
    #[serde(rename = "Date", with = "wire_date")]
    pub date: NaiveDate,
}

impl DeltaInfo {
    /// The download URL, treating an empty string the same as a missing field.
    pub fn published_url(&self) -> Option<&str> {
        self.delta_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Strict `dd.MM.yyyy` codec for the registry's date field.
///
/// Any other format fails the whole run; a parsed date re-renders to the
/// identical literal.
pub(crate) mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::WIRE_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&date.format(WIRE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(de)?;
        NaiveDate::parse_from_str(&raw, WIRE_DATE_FORMAT).map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid registry date '{raw}', expected dd.MM.yyyy"
            ))
        })
    }
}

pub struct RegistryClient {
    client: Client,
    metadata_url: String,
}

impl RegistryClient {
    pub fn new(metadata_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            metadata_url: metadata_url.into(),
        }
    }

    /// Fetch the latest-publication descriptor.
    pub fn fetch_delta_info(&self) -> Result<DeltaInfo, AppError> {
        let resp = self
            .client
            .get(&self.metadata_url)
            .send()
            .map_err(|e| AppError::network(format!("Metadata request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "Metadata request failed with status {}.",
                resp.status()
            )));
        }

        resp.json()
            .map_err(|e| AppError::data(format!("Failed to decode registry metadata: {e}")))
    }

    /// Stream the delta archive at `url` to `dest`.
    ///
    /// The body lands in `<dest>.part` and is renamed into place once the
    /// transfer completes, so an interrupted run never leaves a file later
    /// runs would mistake for a complete archive.
    pub fn download_archive(&self, url: &str, dest: &Path) -> Result<(), AppError> {
        let mut resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::network(format!("Archive request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "Archive request failed with status {}.",
                resp.status()
            )));
        }

        let part = partial_path(dest);
        {
            let mut file = File::create(&part).map_err(|e| {
                AppError::fs(format!("Failed to create '{}': {e}", part.display()))
            })?;
            io::copy(&mut resp, &mut file)
                .map_err(|e| AppError::network(format!("Archive download failed: {e}")))?;
        }

        fs::rename(&part, dest).map_err(|e| {
            AppError::fs(format!(
                "Failed to move downloaded archive into '{}': {e}",
                dest.display()
            ))
        })
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
