use crate::error::{ImportError, Result};
use crate::models::ExercisePerformanceEntry;
use std::path::Path;

pub mod csv;
pub mod json;

/// Trait for reading training history from different file formats
pub trait ImportFormat {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Read all entries from the file
    fn import_file(&self, file_path: &Path) -> Result<Vec<ExercisePerformanceEntry>>;

    /// Get the format name for this importer
    fn get_format_name(&self) -> &'static str;
}

/// Manager for coordinating different import formats
pub struct ImportManager {
    importers: Vec<Box<dyn ImportFormat>>,
}

impl ImportManager {
    /// Create a new import manager with all available importers
    pub fn new() -> Self {
        let importers: Vec<Box<dyn ImportFormat>> = vec![
            Box::new(json::JsonImporter::new()),
            Box::new(csv::CsvImporter::new()),
        ];

        Self { importers }
    }

    /// Import a history file, choosing the importer by extension
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<ExercisePerformanceEntry>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound {
                path: file_path.to_path_buf(),
            }
            .into());
        }

        let importer = self
            .importers
            .iter()
            .find(|importer| importer.can_import(file_path))
            .ok_or_else(|| ImportError::UnsupportedFormat {
                format: file_path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("<none>")
                    .to_string(),
            })?;

        let entries = importer.import_file(file_path)?;

        tracing::info!(
            path = %file_path.display(),
            format = importer.get_format_name(),
            entries = entries.len(),
            "Imported training history"
        );

        Ok(entries)
    }

    /// Get list of supported file formats
    pub fn supported_formats(&self) -> Vec<&'static str> {
        self.importers
            .iter()
            .map(|importer| importer.get_format_name())
            .collect()
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn has_extension(file_path: &Path, wanted: &str) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecoveryRsError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_missing_file() {
        let manager = ImportManager::new();
        let err = manager
            .import_file(Path::new("/definitely/not/here.json"))
            .unwrap_err();

        assert!(matches!(
            err,
            RecoveryRsError::Import(ImportError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let mut file = Builder::new().suffix(".xml").tempfile().unwrap();
        writeln!(file, "<history/>").unwrap();

        let err = ImportManager::new().import_file(file.path()).unwrap_err();
        match err {
            RecoveryRsError::Import(ImportError::UnsupportedFormat { format }) => {
                assert_eq!(format, "xml")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dispatch_by_extension() {
        let mut file = Builder::new().suffix(".JSON").tempfile().unwrap();
        write!(file, r#"[{{"date":"2024-05-01T10:00:00Z","targetMuscle":"Chest"}}]"#).unwrap();

        let entries = ImportManager::new().import_file(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(ImportManager::new().supported_formats(), vec!["JSON", "CSV"]);
    }
}
