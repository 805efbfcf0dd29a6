use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{ImportError, Result};
use crate::import::{has_extension, ImportFormat};
use crate::models::{ExercisePerformanceEntry, SetRecord};

/// CSV importer with flexible column mapping
///
/// One row per set. Consecutive rows sharing date, target and exercise are
/// merged into a single entry. A row with empty weight and reps records the
/// session without a set.
pub struct CsvImporter {
    column_mapping: HashMap<String, String>,
}

impl CsvImporter {
    pub fn new() -> Self {
        let mut column_mapping = HashMap::new();

        Self::add_mapping(
            &mut column_mapping,
            "date",
            &["date", "timestamp", "time", "datetime", "performed_at"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "target_muscle",
            &["target_muscle", "targetmuscle", "target", "muscle", "muscle_group"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "exercise",
            &["exercise", "exercise_name", "movement", "lift"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "weight",
            &["weight", "load", "kg", "lbs", "weight_kg", "weight_lbs"],
        );
        Self::add_mapping(&mut column_mapping, "reps", &["reps", "repetitions", "rep"]);

        Self { column_mapping }
    }

    fn add_mapping(mapping: &mut HashMap<String, String>, standard: &str, variations: &[&str]) {
        for variation in variations {
            mapping.insert(variation.to_lowercase(), standard.to_string());
        }
    }

    fn normalize_column_name(&self, name: &str) -> String {
        let normalized = name.to_lowercase().replace([' ', '-'], "_");

        self.column_mapping
            .get(&normalized)
            .cloned()
            .unwrap_or(normalized)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<Vec<ExercisePerformanceEntry>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (self.normalize_column_name(header), i))
            .collect();

        if !columns.contains_key("date") {
            return Err(ImportError::MissingData {
                field: "date".to_string(),
            }
            .into());
        }

        let mut entries: Vec<ExercisePerformanceEntry> = Vec::new();

        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            // Header is line 1
            let row = index + 2;

            if is_blank(&record) {
                continue;
            }

            let field = |name: &str| column_value(&record, &columns, name);

            let Some(date) = field("date") else {
                tracing::warn!(row, "Skipping CSV row without a date");
                continue;
            };
            let target = field("target_muscle");
            let exercise = field("exercise");
            let set = parse_set(field("weight"), field("reps"), row)?;

            let continues_previous = entries.last().is_some_and(|last| {
                last.date == date
                    && last.target_muscle.as_deref() == target
                    && last.exercise.as_deref() == exercise
            });

            if continues_previous {
                if let (Some(set), Some(last)) = (set, entries.last_mut()) {
                    last.sets.push(set);
                }
                continue;
            }

            let mut entry = ExercisePerformanceEntry::new(date, target);
            entry.exercise = exercise.map(str::to_string);
            entry.sets.extend(set);
            entries.push(entry);
        }

        Ok(entries)
    }
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for CsvImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "csv")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<ExercisePerformanceEntry>> {
        let file = std::fs::File::open(file_path)?;
        self.import_reader(file)
    }

    fn get_format_name(&self) -> &'static str {
        "CSV"
    }
}

fn csv_error(err: csv::Error) -> crate::error::RecoveryRsError {
    ImportError::ParseError {
        format: "CSV".to_string(),
        reason: err.to_string(),
    }
    .into()
}

fn column_value<'r>(
    record: &'r StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Option<&'r str> {
    columns
        .get(name)
        .and_then(|&i| record.get(i))
        .filter(|value| !value.is_empty())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|value| value.is_empty())
}

fn parse_set(weight: Option<&str>, reps: Option<&str>, row: usize) -> Result<Option<SetRecord>> {
    if weight.is_none() && reps.is_none() {
        return Ok(None);
    }

    let weight = match weight {
        Some(raw) => match raw.parse::<f64>() {
            Ok(w) if w.is_finite() && w >= 0.0 => w,
            _ => return Err(invalid("weight", row, raw)),
        },
        None => 0.0,
    };

    let reps = match reps {
        Some(raw) => raw.parse::<u32>().map_err(|_| invalid("reps", row, raw))?,
        None => 0,
    };

    Ok(Some(SetRecord::new(weight, reps)))
}

fn invalid(field: &str, row: usize, value: &str) -> crate::error::RecoveryRsError {
    ImportError::InvalidValue {
        field: field.to_string(),
        row,
        value: value.to_string(),
    }
    .into()
}
