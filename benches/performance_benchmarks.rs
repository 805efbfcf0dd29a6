use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recoveryrs::{ExerciseProgress, ExercisePerformanceEntry, RecoveryEstimator, SetRecord};

/// Performance benchmarks for recovery estimation
///
/// Histories of growing size check that estimation stays linear in the
/// number of entries.

const TARGETS: [&str; 9] = [
    "Chest", "Back", "Legs", "Shoulders", "Arms", "Biceps", "Triceps", "Abs", "Core",
];

fn create_history(size: usize) -> Vec<ExercisePerformanceEntry> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

    (0..size)
        .map(|i| {
            ExercisePerformanceEntry::at(
                start + Duration::hours(i as i64 * 7),
                Some(TARGETS[i % TARGETS.len()]),
            )
            .with_exercise(if i % 2 == 0 { "Squat" } else { "Bench Press" })
            .with_sets(vec![
                SetRecord::new(60.0 + (i % 40) as f64, 8),
                SetRecord::new(70.0 + (i % 40) as f64, 5),
            ])
        })
        .collect()
}

fn bench_recovery_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Recovery Estimate");
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();

    for &size in &[10, 100, 1000, 10000] {
        let history = create_history(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("estimate_at", size),
            &history,
            |b, history| {
                b.iter(|| RecoveryEstimator::estimate_at(black_box(history), now));
            },
        );
    }

    group.finish();
}

fn bench_exercise_progress(c: &mut Criterion) {
    let mut group = c.benchmark_group("Exercise Progress");

    for &size in &[100, 1000, 10000] {
        let history = create_history(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("from_entries", size),
            &history,
            |b, history| {
                b.iter(|| ExerciseProgress::from_entries("Squat", black_box(history)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_recovery_estimate, bench_exercise_progress);
criterion_main!(benches);
