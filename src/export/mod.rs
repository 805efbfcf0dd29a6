use crate::error::ExportError;
use crate::recovery::RecoveryReport;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod json;
pub mod text;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Write a recovery report in the requested format
pub fn export_report<P: AsRef<Path>>(
    report: &RecoveryReport,
    format: ExportFormat,
    output_path: P,
) -> Result<(), ExportError> {
    let output_path = output_path.as_ref();

    let result = match format {
        ExportFormat::Json => json::export_json(report, output_path),
        ExportFormat::Text => text::export_recovery_report(report, output_path),
    };

    if result.is_ok() {
        tracing::info!(path = %output_path.display(), format = ?format, "Report exported");
    }
    result
}

pub(crate) fn write_failed(path: &Path, err: std::io::Error) -> ExportError {
    ExportError::ExportFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat { .. })
        ));
    }
}
