use chrono::{DateTime, Duration, TimeZone, Utc};
use recoveryrs::import::ImportManager;
use recoveryrs::{
    export, ExerciseProgress, ExercisePerformanceEntry, Muscle, Recommendation, RecoveryEstimator,
    RecoveryStatus, SetRecord,
};
use std::io::Write;
use tempfile::Builder;

/// Integration tests that exercise complete import -> estimate -> export workflows

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 10, 18, 0, 0).unwrap()
}

fn hours_ago(hours: i64) -> String {
    (now() - Duration::hours(hours)).to_rfc3339()
}

#[test]
fn test_csv_history_to_report() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "date,target_muscle,exercise,weight,reps").unwrap();
    writeln!(file, "{},Legs,Squat,140,5", hours_ago(30)).unwrap();
    writeln!(file, "{},Legs,Squat,150,3", hours_ago(30)).unwrap();
    writeln!(file, "{},Chest,Bench Press,100,5", hours_ago(50)).unwrap();
    writeln!(file, "{},Legs,Squat,135,5", hours_ago(150)).unwrap();

    let entries = ImportManager::new().import_file(file.path()).unwrap();
    assert_eq!(entries.len(), 3);

    let report = RecoveryEstimator::estimate_at(&entries, now());

    // Quads: 30 / 72 = 41.7% -> 42
    let quads = report.status(Muscle::Quads).unwrap();
    assert_eq!(quads.recovery_percentage(), 42);
    assert_eq!(quads.status(), RecoveryStatus::Fatigued);

    // Calves use the 48h table entry: 30 / 48 = 62.5% -> 63
    let calves = report.status(Muscle::Calves).unwrap();
    assert_eq!(calves.recovery_percentage(), 63);
    assert_eq!(calves.status(), RecoveryStatus::Recovering);

    // Chest at 50h is past its 48h window
    assert_eq!(report.status(Muscle::Chest).unwrap().status(), RecoveryStatus::Ready);

    // Quads and Hamstrings tie at 42; report order puts Quads first
    assert_eq!(report.fatigued_muscles()[0].name(), Muscle::Quads);
    assert_eq!(report.recommendation, Recommendation::LegsFatigued);
    assert_eq!(report.fatigued_count, 4);

    let progress = ExerciseProgress::from_entries("squat", &entries);
    assert_eq!(progress.points.len(), 2);
    assert_eq!(progress.best_weight, 150.0);
}

#[test]
fn test_json_history_with_bad_dates() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    let entries = vec![
        ExercisePerformanceEntry::new(hours_ago(2), Some("Shoulders")),
        ExercisePerformanceEntry::new("31/02/2024", Some("Biceps")),
        ExercisePerformanceEntry::new(hours_ago(5), Some("Core"))
            .with_exercise("Plank")
            .with_sets(vec![SetRecord::new(0.0, 1)]),
    ];
    write!(file, "{}", serde_json::to_string(&entries).unwrap()).unwrap();

    let loaded = ImportManager::new().import_file(file.path()).unwrap();
    assert_eq!(loaded, entries);

    let report = RecoveryEstimator::estimate_at(&loaded, now());

    assert!(report.status(Muscle::Biceps).unwrap().last_trained().is_none());
    assert_eq!(report.status(Muscle::Delts).unwrap().recovery_percentage(), 4);
    assert_eq!(report.status(Muscle::Abs).unwrap().recovery_percentage(), 21);
    assert_eq!(report.recommendation, Recommendation::PushNeedsRest);
}

#[test]
fn test_estimate_is_repeatable() {
    let entries = vec![
        ExercisePerformanceEntry::new(hours_ago(12), Some("Back")),
        ExercisePerformanceEntry::new(hours_ago(40), Some("Arms")),
    ];

    let first = RecoveryEstimator::estimate_at(&entries, now());
    let second = RecoveryEstimator::estimate_at(&entries, now());
    assert_eq!(first, second);

    let mut reversed = entries.clone();
    reversed.reverse();
    assert_eq!(RecoveryEstimator::estimate_at(&reversed, now()), first);
}

#[test]
fn test_readiness_improves_with_time() {
    let entries: Vec<_> = ["Chest", "Back", "Legs", "Shoulders", "Arms", "Abs"]
        .iter()
        .map(|target| ExercisePerformanceEntry::new(hours_ago(0), Some(*target)))
        .collect();

    let mut previous = 0;
    for hours in [0, 6, 12, 24, 36, 48, 72, 96] {
        let report = RecoveryEstimator::estimate_at(&entries, now() + Duration::hours(hours));
        assert!(report.global_readiness >= previous);
        previous = report.global_readiness;
    }
    assert_eq!(previous, 100);

    let fresh = RecoveryEstimator::estimate_at(&entries, now());
    assert_eq!(fresh.recommendation, Recommendation::SystemicFatigue);
}

#[test]
fn test_export_round_trip_to_disk() {
    let entries = vec![ExercisePerformanceEntry::new(hours_ago(20), Some("Lats"))];
    let report = RecoveryEstimator::estimate_at(&entries, now());

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    let text_path = dir.path().join("report.txt");

    export::export_report(&report, export::ExportFormat::Json, &json_path).unwrap();
    export::export_report(&report, export::ExportFormat::Text, &text_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["muscle_status"]["Lats"]["recovery_percentage"], 42);
    assert_eq!(
        json["recommendation"],
        "Back is recovering. Focus on Pushing movements or Legs."
    );

    let text = std::fs::read_to_string(&text_path).unwrap();
    assert!(text.contains("Back is recovering."));
}
