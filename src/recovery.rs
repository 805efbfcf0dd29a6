//! Muscle recovery estimation from strength-training history
//!
//! This module turns a list of logged exercise entries into a per-muscle
//! recovery picture, a single readiness score and a training recommendation.
//!
//! # Training Background
//!
//! After a resistance session the worked muscles need a rest period before
//! they can be trained hard again. Large lower-body muscles (quads,
//! hamstrings) typically need around 72 hours, most upper-body muscles about
//! 48 hours, and small muscles such as biceps, triceps and abs about 24 hours.
//!
//! - **Recovery percentage**: share of the required rest period that has
//!   elapsed since the muscle was last trained, capped at 100.
//! - **Status**: bands the percentage:
//!   - **Fatigued**: below 50%
//!   - **Recovering**: 50% up to 90%
//!   - **Ready**: 90% and above
//! - **Global readiness**: mean recovery percentage across all tracked muscles.
//!
//! A muscle that has never been trained is reported as fully recovered with
//! [`NEVER_TRAINED_HOURS`] as its elapsed time.
//!
//! The estimate is a pure function of the history and the evaluation instant;
//! nothing is cached or persisted between calls.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::models::ExercisePerformanceEntry;
use crate::muscles::{resolve_target, Muscle, ResolvedMuscle};

/// Elapsed-hours sentinel for muscles with no recorded training
pub const NEVER_TRAINED_HOURS: f64 = 999.0;

/// Readiness below this triggers the systemic fatigue recommendation
pub const SYSTEMIC_FATIGUE_THRESHOLD: u8 = 40;

/// Recovery status bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryStatus {
    /// Less than half of the required rest has elapsed
    Fatigued,
    /// Partially recovered, light or indirect work only
    Recovering,
    /// Ready for hard training
    Ready,
}

impl RecoveryStatus {
    /// Lower bound (inclusive) of the recovering band
    pub const RECOVERING_FROM: u8 = 50;
    /// Lower bound (inclusive) of the ready band
    pub const READY_FROM: u8 = 90;

    /// Determine status from a recovery percentage
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= Self::READY_FROM {
            RecoveryStatus::Ready
        } else if percentage >= Self::RECOVERING_FROM {
            RecoveryStatus::Recovering
        } else {
            RecoveryStatus::Fatigued
        }
    }

    /// Display color hint for heatmaps and tables
    pub fn color(&self) -> &'static str {
        match self {
            RecoveryStatus::Fatigued => "#ef4444",
            RecoveryStatus::Recovering => "#eab308",
            RecoveryStatus::Ready => "#22c55e",
        }
    }
}

impl fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryStatus::Fatigued => write!(f, "FATIGUED"),
            RecoveryStatus::Recovering => write!(f, "RECOVERING"),
            RecoveryStatus::Ready => write!(f, "READY"),
        }
    }
}

/// Recovery state of one tracked muscle
///
/// `status` and `color` are derived from `recovery_percentage` at
/// construction and are only readable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleStatus {
    name: Muscle,
    last_trained: Option<DateTime<Utc>>,
    recovery_percentage: u8,
    hours_since: f64,
    status: RecoveryStatus,
    color: &'static str,
}

impl MuscleStatus {
    /// Status for a muscle with no recorded training
    pub fn never_trained(name: Muscle) -> Self {
        Self::from_parts(name, None, NEVER_TRAINED_HOURS, 100)
    }

    /// Status for a muscle last trained at `last_trained`, evaluated at `now`
    ///
    /// Timestamps after `now` count as zero elapsed hours.
    pub fn trained(name: Muscle, last_trained: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let hours_since =
            ((now - last_trained).num_milliseconds() as f64 / 3_600_000.0).max(0.0);
        let percentage = recovery_percentage(hours_since, name.required_recovery_hours());

        Self::from_parts(name, Some(last_trained), hours_since, percentage)
    }

    fn from_parts(
        name: Muscle,
        last_trained: Option<DateTime<Utc>>,
        hours_since: f64,
        recovery_percentage: u8,
    ) -> Self {
        let status = RecoveryStatus::from_percentage(recovery_percentage);
        Self {
            name,
            last_trained,
            recovery_percentage,
            hours_since,
            status,
            color: status.color(),
        }
    }

    pub fn name(&self) -> Muscle {
        self.name
    }

    pub fn last_trained(&self) -> Option<DateTime<Utc>> {
        self.last_trained
    }

    pub fn recovery_percentage(&self) -> u8 {
        self.recovery_percentage
    }

    pub fn hours_since(&self) -> f64 {
        self.hours_since
    }

    pub fn status(&self) -> RecoveryStatus {
        self.status
    }

    pub fn color(&self) -> &'static str {
        self.color
    }
}

/// Share of the required rest that has elapsed, rounded and capped at 100
pub fn recovery_percentage(hours_since: f64, required_hours: u32) -> u8 {
    if required_hours == 0 {
        return 100;
    }
    let raw = (hours_since / f64::from(required_hours) * 100.0).round();
    raw.clamp(0.0, 100.0) as u8
}

/// Training advice derived from the recovery picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    FullyRecovered,
    LegsFatigued,
    PushNeedsRest,
    BackRecovering,
    MuscleRecovering(Muscle),
    SystemicFatigue,
}

impl Recommendation {
    /// Pick the advice for a set of muscle statuses and the overall readiness
    ///
    /// Low global readiness overrides whatever the most fatigued muscle
    /// suggests.
    pub fn choose(most_fatigued: Option<Muscle>, global_readiness: u8) -> Self {
        if global_readiness < SYSTEMIC_FATIGUE_THRESHOLD {
            return Recommendation::SystemicFatigue;
        }

        match most_fatigued {
            None => Recommendation::FullyRecovered,
            Some(Muscle::Quads | Muscle::Hamstrings) => Recommendation::LegsFatigued,
            Some(Muscle::Chest | Muscle::Delts) => Recommendation::PushNeedsRest,
            Some(Muscle::Lats) => Recommendation::BackRecovering,
            Some(other) => Recommendation::MuscleRecovering(other),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::FullyRecovered => write!(
                f,
                "You are fully recovered. Perfect day for a heavy compound session or testing PRs."
            ),
            Recommendation::LegsFatigued => write!(
                f,
                "Legs are fatigued. Consider an Upper Body Push or Pull focus today."
            ),
            Recommendation::PushNeedsRest => {
                write!(f, "Push muscles need rest. Good day for Legs or Back.")
            }
            Recommendation::BackRecovering => {
                write!(f, "Back is recovering. Focus on Pushing movements or Legs.")
            }
            Recommendation::MuscleRecovering(muscle) => write!(
                f,
                "Your {} is recovering. Focus on other muscle groups.",
                muscle
            ),
            Recommendation::SystemicFatigue => write!(
                f,
                "Systemic fatigue is high. Consider an Active Recovery day, light cardio, or complete rest."
            ),
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Most recent training time per resolved muscle name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LastTrainedIndex {
    /// Tracked muscles
    pub tracked: HashMap<Muscle, DateTime<Utc>>,
    /// Names outside the tracked set, such as "LowerBack"
    pub untracked: BTreeMap<String, DateTime<Utc>>,
    /// Entries ignored because their date could not be parsed
    pub skipped_entries: usize,
}

impl LastTrainedIndex {
    /// Resolve every entry's target and keep the latest timestamp per muscle
    pub fn from_entries(entries: &[ExercisePerformanceEntry]) -> Self {
        let mut index = LastTrainedIndex::default();

        for entry in entries {
            let Some(date) = entry.timestamp() else {
                tracing::warn!(date = %entry.date, "Ignoring entry with unparseable date");
                index.skipped_entries += 1;
                continue;
            };

            for resolved in resolve_target(entry.target_muscle.as_deref()) {
                match resolved {
                    ResolvedMuscle::Tracked(muscle) => {
                        keep_latest(index.tracked.entry(muscle).or_insert(date), date);
                    }
                    ResolvedMuscle::Untracked(name) => {
                        keep_latest(index.untracked.entry(name).or_insert(date), date);
                    }
                }
            }
        }

        index
    }

    pub fn last_trained(&self, muscle: Muscle) -> Option<DateTime<Utc>> {
        self.tracked.get(&muscle).copied()
    }
}

fn keep_latest(slot: &mut DateTime<Utc>, candidate: DateTime<Utc>) {
    if candidate > *slot {
        *slot = candidate;
    }
}

/// Complete recovery estimate for a training history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecoveryReport {
    /// Instant the estimate was evaluated at
    pub evaluated_at: DateTime<Utc>,

    /// One status per tracked muscle
    pub muscle_status: BTreeMap<Muscle, MuscleStatus>,

    /// Mean recovery percentage across all tracked muscles (0-100)
    pub global_readiness: u8,

    /// Training advice for today
    pub recommendation: Recommendation,

    /// Number of muscles that are not yet ready
    pub fatigued_count: usize,

    /// Last training times for resolved names outside the tracked set
    ///
    /// Never contributes to readiness or the recommendation.
    pub untracked: BTreeMap<String, DateTime<Utc>>,
}

impl RecoveryReport {
    pub fn status(&self, muscle: Muscle) -> Option<&MuscleStatus> {
        self.muscle_status.get(&muscle)
    }

    /// Muscles that are not ready, most fatigued first
    ///
    /// Ties keep report order.
    pub fn fatigued_muscles(&self) -> Vec<&MuscleStatus> {
        let mut fatigued: Vec<&MuscleStatus> = Muscle::ALL
            .iter()
            .filter_map(|m| self.muscle_status.get(m))
            .filter(|s| s.status() != RecoveryStatus::Ready)
            .collect();
        fatigued.sort_by_key(|s| s.recovery_percentage());
        fatigued
    }
}

/// Recovery estimator
pub struct RecoveryEstimator;

impl RecoveryEstimator {
    /// Estimate recovery as of the current wall-clock time
    pub fn estimate(entries: &[ExercisePerformanceEntry]) -> RecoveryReport {
        Self::estimate_at(entries, Utc::now())
    }

    /// Estimate recovery as of `now`
    ///
    /// # Algorithm
    ///
    /// 1. Resolve each entry's target to specific muscles and keep the most
    ///    recent timestamp per muscle.
    /// 2. For each tracked muscle compute elapsed hours and recovery
    ///    percentage against its required rest period.
    /// 3. Average the percentages into global readiness.
    /// 4. Choose a recommendation from the most fatigued muscle, overridden
    ///    when global readiness signals systemic fatigue.
    pub fn estimate_at(entries: &[ExercisePerformanceEntry], now: DateTime<Utc>) -> RecoveryReport {
        let index = LastTrainedIndex::from_entries(entries);

        let muscle_status: BTreeMap<Muscle, MuscleStatus> = Muscle::ALL
            .iter()
            .map(|&muscle| {
                let status = match index.last_trained(muscle) {
                    Some(last) => MuscleStatus::trained(muscle, last, now),
                    None => MuscleStatus::never_trained(muscle),
                };
                (muscle, status)
            })
            .collect();

        let global_readiness = global_readiness(muscle_status.values());

        let mut report = RecoveryReport {
            evaluated_at: now,
            muscle_status,
            global_readiness,
            recommendation: Recommendation::FullyRecovered,
            fatigued_count: 0,
            untracked: index.untracked,
        };

        let fatigued = report.fatigued_muscles();
        let fatigued_count = fatigued.len();
        let most_fatigued = fatigued.first().map(|s| s.name());

        report.fatigued_count = fatigued_count;
        report.recommendation = Recommendation::choose(most_fatigued, global_readiness);

        tracing::debug!(
            entries = entries.len(),
            skipped = index.skipped_entries,
            global_readiness,
            fatigued_count,
            "Recovery estimate computed"
        );

        report
    }
}

/// Rounded mean recovery percentage, 100 for an empty set
pub fn global_readiness<'a>(statuses: impl IntoIterator<Item = &'a MuscleStatus>) -> u8 {
    let (sum, count) = statuses
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| {
            (sum + u32::from(s.recovery_percentage()), count + 1)
        });

    if count == 0 {
        return 100;
    }

    (f64::from(sum) / f64::from(count)).round() as u8
}
