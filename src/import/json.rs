use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{ImportError, Result};
use crate::import::{has_extension, ImportFormat};
use crate::models::ExercisePerformanceEntry;

/// Reads a JSON array of entries as written by the history store
///
/// Field names may be snake_case or camelCase.
pub struct JsonImporter;

impl JsonImporter {
    pub fn new() -> Self {
        Self
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<Vec<ExercisePerformanceEntry>> {
        let entries: Vec<ExercisePerformanceEntry> =
            serde_json::from_reader(reader).map_err(|e| ImportError::ParseError {
                format: "JSON".to_string(),
                reason: e.to_string(),
            })?;

        for (index, entry) in entries.iter().enumerate() {
            if let Some(set) = entry
                .sets
                .iter()
                .find(|set| !set.weight.is_finite() || set.weight < 0.0)
            {
                return Err(ImportError::InvalidValue {
                    field: "weight".to_string(),
                    row: index + 1,
                    value: set.weight.to_string(),
                }
                .into());
            }
        }

        Ok(entries)
    }
}

impl Default for JsonImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for JsonImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "json")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<ExercisePerformanceEntry>> {
        let file = File::open(file_path)?;
        self.import_reader(BufReader::new(file))
    }

    fn get_format_name(&self) -> &'static str {
        "JSON"
    }
}
