//! Per-exercise progress series
//!
//! Builds the data behind an exercise detail view: one point per session
//! with the heaviest set, total volume and an estimated one-rep max, plus
//! personal bests across the whole history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ExercisePerformanceEntry, SetRecord};

/// Estimated one-rep max using the Epley formula
///
/// `weight * (1 + reps / 30)`, with a single rep returning the weight itself
/// and zero reps returning 0.
pub fn estimated_one_rep_max(set: &SetRecord) -> f64 {
    match set.reps {
        0 => 0.0,
        1 => set.weight,
        reps => set.weight * (1.0 + f64::from(reps) / 30.0),
    }
}

/// One session of a single exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: DateTime<Utc>,

    /// Heaviest weight lifted in the session
    pub top_weight: f64,

    /// Sum of weight x reps
    pub volume: f64,

    pub total_reps: u64,

    /// Best estimated one-rep max of any set in the session
    pub estimated_1rm: f64,
}

/// Progress series and personal bests for one exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseProgress {
    pub exercise: String,

    /// Sessions in chronological order
    pub points: Vec<ProgressPoint>,

    pub best_weight: f64,
    pub best_estimated_1rm: f64,
    pub total_volume: f64,
}

impl ExerciseProgress {
    /// Collect the sessions of `exercise` from a history
    ///
    /// Name matching ignores ASCII case. Entries whose date cannot be parsed
    /// are left out.
    pub fn from_entries(exercise: &str, entries: &[ExercisePerformanceEntry]) -> Self {
        let mut points: Vec<ProgressPoint> = entries
            .iter()
            .filter(|entry| {
                entry
                    .exercise
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(exercise))
            })
            .filter_map(|entry| entry.timestamp().map(|date| session_point(date, entry)))
            .collect();

        points.sort_by_key(|point| point.date);

        let best_weight = points.iter().map(|p| p.top_weight).fold(0.0, f64::max);
        let best_estimated_1rm = points.iter().map(|p| p.estimated_1rm).fold(0.0, f64::max);
        let total_volume = points.iter().map(|p| p.volume).sum();

        Self {
            exercise: exercise.to_string(),
            points,
            best_weight,
            best_estimated_1rm,
            total_volume,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Change in estimated one-rep max from the first to the latest session
    pub fn estimated_1rm_change(&self) -> Option<f64> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => {
                Some(last.estimated_1rm - first.estimated_1rm)
            }
            _ => None,
        }
    }
}

fn session_point(date: DateTime<Utc>, entry: &ExercisePerformanceEntry) -> ProgressPoint {
    ProgressPoint {
        date,
        top_weight: entry.sets.iter().map(|s| s.weight).fold(0.0, f64::max),
        volume: entry.total_volume(),
        total_reps: entry.total_reps(),
        estimated_1rm: entry
            .sets
            .iter()
            .map(estimated_one_rep_max)
            .fold(0.0, f64::max),
    }
}
