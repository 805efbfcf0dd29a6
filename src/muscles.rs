//! Muscle identifiers and the fixed lookup tables used by the recovery estimator
//!
//! Two tables drive the estimate:
//!
//! - **Target mapping**: expands a generic training target ("Legs") into the
//!   specific muscles it works. Names absent from the table resolve to
//!   themselves, so a target of "Quads" trains Quads directly.
//! - **Recovery hours**: the rest period a muscle needs before it is
//!   considered fully recovered. The table is keyed by a mix of generic and
//!   specific names and is looked up by the specific muscle's own name, so
//!   Lats, Traps and Delts fall through to the 48 hour default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recovery period applied when a muscle has no entry in [`RECOVERY_HOURS`]
pub const DEFAULT_RECOVERY_HOURS: u32 = 48;

/// Target name used for entries that carry no target at all
pub const UNKNOWN_TARGET: &str = "Unknown";

/// Generic target to specific muscle names
pub const TARGET_MAPPING: &[(&str, &[&str])] = &[
    ("Chest", &["Chest"]),
    ("Back", &["Lats", "Traps", "LowerBack"]),
    ("Legs", &["Quads", "Hamstrings", "Glutes", "Calves"]),
    ("Shoulders", &["Delts"]),
    ("Arms", &["Biceps", "Triceps"]),
    ("Biceps", &["Biceps"]),
    ("Triceps", &["Triceps"]),
    ("Abs", &["Abs"]),
    ("Core", &["Abs"]),
];

/// Required recovery hours by name
pub const RECOVERY_HOURS: &[(&str, u32)] = &[
    ("Chest", 48),
    ("Back", 48),
    ("Legs", 72),
    ("Quads", 72),
    ("Hamstrings", 72),
    ("Calves", 48),
    ("Shoulders", 48),
    ("Biceps", 24),
    ("Triceps", 24),
    ("Abs", 24),
    ("Glutes", 48),
];

/// The muscle groups tracked in a recovery report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Muscle {
    Chest,
    Lats,
    Traps,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Delts,
    Biceps,
    Triceps,
    Abs,
}

impl Muscle {
    /// Every tracked muscle, in report order
    pub const ALL: [Muscle; 11] = [
        Muscle::Chest,
        Muscle::Lats,
        Muscle::Traps,
        Muscle::Quads,
        Muscle::Hamstrings,
        Muscle::Glutes,
        Muscle::Calves,
        Muscle::Delts,
        Muscle::Biceps,
        Muscle::Triceps,
        Muscle::Abs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Muscle::Chest => "Chest",
            Muscle::Lats => "Lats",
            Muscle::Traps => "Traps",
            Muscle::Quads => "Quads",
            Muscle::Hamstrings => "Hamstrings",
            Muscle::Glutes => "Glutes",
            Muscle::Calves => "Calves",
            Muscle::Delts => "Delts",
            Muscle::Biceps => "Biceps",
            Muscle::Triceps => "Triceps",
            Muscle::Abs => "Abs",
        }
    }

    /// Exact, case-sensitive lookup of a tracked muscle name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// Hours of rest this muscle needs, looked up by its own name
    pub fn required_recovery_hours(&self) -> u32 {
        recovery_hours_for(self.name())
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Muscle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown muscle: {}", s))
    }
}

/// Required recovery hours for any name, falling back to [`DEFAULT_RECOVERY_HOURS`]
pub fn recovery_hours_for(name: &str) -> u32 {
    RECOVERY_HOURS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, hours)| *hours)
        .unwrap_or(DEFAULT_RECOVERY_HOURS)
}

/// A specific muscle name produced by resolving a target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedMuscle {
    /// One of the muscles reported on
    Tracked(Muscle),
    /// Anything else: "LowerBack", "Unknown", or an unmapped target name
    Untracked(String),
}

impl ResolvedMuscle {
    fn from_name(name: &str) -> Self {
        match Muscle::from_name(name) {
            Some(muscle) => ResolvedMuscle::Tracked(muscle),
            None => ResolvedMuscle::Untracked(name.to_string()),
        }
    }
}

/// Expand an entry's target into the specific muscles it trained
pub fn resolve_target(target: Option<&str>) -> Vec<ResolvedMuscle> {
    let target = target.unwrap_or(UNKNOWN_TARGET);

    match TARGET_MAPPING.iter().find(|(generic, _)| *generic == target) {
        Some((_, specifics)) => specifics
            .iter()
            .map(|name| ResolvedMuscle::from_name(name))
            .collect(),
        None => vec![ResolvedMuscle::from_name(target)],
    }
}
