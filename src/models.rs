use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// A single working set within an exercise entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Load lifted (any consistent unit, kg or lb)
    pub weight: f64,

    /// Completed repetitions
    pub reps: u32,
}

impl SetRecord {
    pub fn new(weight: f64, reps: u32) -> Self {
        Self { weight, reps }
    }

    /// Weight multiplied by reps
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// One logged exercise performance from the caller's history store
///
/// The timestamp is kept as the raw text the store produced. It is only
/// interpreted when an estimate is computed, so a malformed value never
/// prevents the rest of the history from loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePerformanceEntry {
    /// When the exercise was performed
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: String,

    /// Generic target ("Legs", "Chest") or a specific muscle name
    #[serde(default, alias = "targetMuscle", skip_serializing_if = "Option::is_none")]
    pub target_muscle: Option<String>,

    /// Exercise name, used for progress tracking only
    #[serde(default, alias = "exerciseName", skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,

    /// Sets in the order they were performed
    #[serde(default)]
    pub sets: Vec<SetRecord>,
}

impl ExercisePerformanceEntry {
    pub fn new(date: impl Into<String>, target_muscle: Option<&str>) -> Self {
        Self {
            date: date.into(),
            target_muscle: target_muscle.map(str::to_string),
            exercise: None,
            sets: Vec::new(),
        }
    }

    /// Build an entry from an already-resolved instant
    pub fn at(date: DateTime<Utc>, target_muscle: Option<&str>) -> Self {
        Self::new(date.to_rfc3339(), target_muscle)
    }

    pub fn with_exercise(mut self, exercise: impl Into<String>) -> Self {
        self.exercise = Some(exercise.into());
        self
    }

    pub fn with_sets(mut self, sets: Vec<SetRecord>) -> Self {
        self.sets = sets;
        self
    }

    /// Parsed timestamp, `None` when the stored text is not a recognizable instant
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    /// Sum of weight x reps over all sets
    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(SetRecord::volume).sum()
    }

    pub fn total_reps(&self) -> u64 {
        self.sets.iter().map(|s| u64::from(s.reps)).sum()
    }
}

/// Accept a date written as text or as a JSON number of epoch milliseconds
///
/// Numbers are stored as their decimal text. Any other JSON value becomes an
/// empty date, which the estimator skips like any unparseable timestamp.
fn deserialize_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Millis(i64),
        Fractional(f64),
        Other(IgnoredAny),
    }

    Ok(match RawDate::deserialize(deserializer)? {
        RawDate::Text(text) => text,
        RawDate::Millis(millis) => millis.to_string(),
        RawDate::Fractional(millis) => (millis.trunc() as i64).to_string(),
        RawDate::Other(_) => String::new(),
    })
}

/// Shorter digit strings are not read as epoch milliseconds
const MIN_EPOCH_MILLIS_DIGITS: usize = 10;

/// Parse a history timestamp
///
/// Accepts RFC 3339, common naive date-time layouts (taken as UTC), bare
/// `YYYY-MM-DD` dates (midnight UTC), bare four-digit years (January 1st)
/// and integer epoch milliseconds of at least ten digits.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for format in &formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return match raw.len() {
            4 => raw
                .parse::<i32>()
                .ok()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc)),
            len if len >= MIN_EPOCH_MILLIS_DIGITS => raw
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis),
            _ => None,
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_and_date_only() {
        assert_eq!(
            parse_timestamp("2024-03-01 10:30:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_epoch_millis() {
        let dt = parse_timestamp("1709287200000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_year_and_short_digits() {
        assert_eq!(
            parse_timestamp("2024").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_timestamp("20240301").is_none());
        assert!(parse_timestamp("42").is_none());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn test_entry_volume() {
        let entry = ExercisePerformanceEntry::new("2024-03-01", Some("Chest"))
            .with_sets(vec![SetRecord::new(100.0, 5), SetRecord::new(90.0, 8)]);

        assert_eq!(entry.total_volume(), 1220.0);
        assert_eq!(entry.total_reps(), 13);
    }

    #[test]
    fn test_total_reps_does_not_overflow() {
        let entry = ExercisePerformanceEntry::new("2024-03-01", Some("Abs"))
            .with_sets(vec![SetRecord::new(0.0, u32::MAX), SetRecord::new(0.0, u32::MAX)]);

        assert_eq!(entry.total_reps(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_entry_date_from_number() {
        let entry: ExercisePerformanceEntry =
            serde_json::from_str(r#"{"date":1709287200000,"targetMuscle":"Chest"}"#).unwrap();
        assert_eq!(entry.date, "1709287200000");
        assert_eq!(
            entry.timestamp().unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );

        let entry: ExercisePerformanceEntry =
            serde_json::from_str(r#"{"date":null,"targetMuscle":"Chest"}"#).unwrap();
        assert!(entry.timestamp().is_none());
    }

    #[test]
    fn test_entry_deserializes_camel_case() {
        let json = r#"{"date":"2024-03-01T08:00:00Z","targetMuscle":"Legs","sets":[{"weight":140,"reps":5}]}"#;
        let entry: ExercisePerformanceEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.target_muscle.as_deref(), Some("Legs"));
        assert_eq!(entry.sets, vec![SetRecord::new(140.0, 5)]);
        assert!(entry.exercise.is_none());
    }
}
