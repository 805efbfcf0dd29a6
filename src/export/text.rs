use super::write_failed;
use crate::error::ExportError;
use crate::muscles::Muscle;
use crate::recovery::RecoveryReport;
use std::io::Write;
use std::path::Path;

/// Export a recovery report to human-readable text format
pub fn export_recovery_report<P: AsRef<Path>>(
    report: &RecoveryReport,
    output_path: P,
) -> Result<(), ExportError> {
    let output_path = output_path.as_ref();
    let mut buffer = Vec::new();
    render(report, &mut buffer).map_err(|e| write_failed(output_path, e))?;

    std::fs::write(output_path, buffer).map_err(|e| write_failed(output_path, e))
}

/// Render the report as plain text
pub fn render<W: Write>(report: &RecoveryReport, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "=")?;
    writeln!(out, "RECOVERY REPORT")?;
    writeln!(out, "=")?;
    writeln!(out)?;

    writeln!(
        out,
        "Evaluated: {}",
        report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "Global Readiness: {}%", report.global_readiness)?;
    writeln!(out, "Muscles Not Ready: {}", report.fatigued_count)?;
    writeln!(out)?;

    writeln!(out, "MUSCLE STATUS")?;
    writeln!(out, "-")?;
    for muscle in Muscle::ALL {
        let Some(status) = report.status(muscle) else {
            continue;
        };
        let last = match status.last_trained() {
            Some(_) => format!("{:.1}h ago", status.hours_since()),
            None => "never".to_string(),
        };
        writeln!(
            out,
            "{:<12} {:>3}%  {:<10} {}",
            muscle.name(),
            status.recovery_percentage(),
            status.status().to_string(),
            last
        )?;
    }
    writeln!(out)?;

    if !report.untracked.is_empty() {
        writeln!(out, "OTHER TRAINED AREAS")?;
        writeln!(out, "-")?;
        for (name, at) in &report.untracked {
            writeln!(out, "{:<12} {}", name, at.format("%Y-%m-%d %H:%M"))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "RECOMMENDATION")?;
    writeln!(out, "-")?;
    writeln!(out, "{}", report.recommendation)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExercisePerformanceEntry;
    use crate::recovery::RecoveryEstimator;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_text_report() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let entries = vec![ExercisePerformanceEntry::at(now - Duration::hours(24), Some("Back"))];
        let report = RecoveryEstimator::estimate_at(&entries, now);

        let mut out = Vec::new();
        render(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Global Readiness: 91%"));
        assert!(text.contains("Lats          50%  RECOVERING 24.0h ago"));
        assert!(text.contains("Chest        100%  READY      never"));
        assert!(text.contains("LowerBack"));
        assert!(text.contains("Back is recovering."));
    }

    #[test]
    fn test_export_text_file() {
        let report = RecoveryEstimator::estimate_at(&[], Utc::now());
        let temp_file = NamedTempFile::new().unwrap();

        export_recovery_report(&report, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("RECOVERY REPORT"));
        assert!(content.contains("You are fully recovered."));
    }
}
