// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::report::builder::{estimate_size, validate_report};
use crate::report::model::Report;
use crate::utils::error::StorageError;

/// Writes normalized reports and their metadata sidecars under
/// `<base_dir>/<LABEL>/<YYYY-MM-DD>/`.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self {
            base_dir: base_path,
        })
    }

    fn target_dir(&self, label: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self
            .base_dir
            .join(label.to_uppercase())
            .join(Utc::now().format("%Y-%m-%d").to_string());

        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the normalized report as JSON and returns the file path.
    pub fn save_report(
        &self,
        report: &Report,
        label: &str,
        pretty: bool,
    ) -> Result<PathBuf, StorageError> {
        let target_dir = self.target_dir(label)?;
        let file_path = target_dir.join("report.json");

        let serialized = if pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, serialized).map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a metadata sidecar next to the report: size estimate, missing
    /// foundational sections, account count, timestamps.
    pub fn save_report_metadata(
        &self,
        report: &Report,
        label: &str,
    ) -> Result<PathBuf, StorageError> {
        let target_dir = self.target_dir(label)?;
        let file_path = target_dir.join("report_meta.json");

        let metadata = serde_json::json!({
            "label": label,
            "estimated_bytes": estimate_size(report),
            "missing_sections": validate_report(report),
            "account_count": report.account_history.as_ref().map(|accounts| accounts.len()),
            "paginated": report.account_history_pagination.is_some(),
            "scraped_at": report.scraped_at,
            "saved_at": Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::builder::build_report;
    use crate::report::model::{ExtractionOptions, RawSections};

    #[test]
    fn test_save_report_and_metadata() {
        let dir = std::env::temp_dir().join("credit_extractor_storage_test");
        let storage = StorageManager::new(&dir).unwrap();
        let report = build_report(&RawSections::default(), &ExtractionOptions::default());

        let report_path = storage.save_report(&report, "demo", true).unwrap();
        let meta_path = storage.save_report_metadata(&report, "demo").unwrap();

        assert!(report_path.ends_with("report.json"));
        assert!(report_path.to_string_lossy().contains("DEMO"));

        let meta: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(meta_path).unwrap()).unwrap();
        assert_eq!(meta["label"], serde_json::json!("demo"));
        assert_eq!(
            meta["missing_sections"],
            serde_json::json!(["credit_scores_3b", "personal_information", "summary"])
        );
        assert_eq!(meta["account_count"], serde_json::Value::Null);
    }
}
