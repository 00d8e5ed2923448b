//! Task record model
//!
//! A task lives in exactly one day file. Ids split into two ranges:
//!
//! - `1..=118`: the one-off pool, unique within a single day file and reused
//!   across days.
//! - `> 118`: recurring series ids, issued by the series allocator and shared
//!   by every occurrence of the series.
//!
//! The on-disk keys (`fromTime`, `toTime`, upper-case status values) match the
//! files produced by the mobile app, so existing stores load unchanged.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Highest id in the per-day one-off pool
pub const ONE_OFF_POOL_MAX: u32 = 118;

/// Initial value of the series counter when no allocator file exists yet.
///
/// Id 119 is never handed out by either range.
pub const DEFAULT_SERIES_ID: u32 = 120;

/// Completion state of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task record as persisted in a day file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(with = "time_of_day")]
    pub from_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub to_time: NaiveTime,
    #[serde(default)]
    pub status: TaskStatus,
    /// Free-text report, filled in when the task is completed
    #[serde(default)]
    pub report: String,
    /// Opaque storage locators; never dereferenced by the store
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl Task {
    /// Create a pending task with no id assigned yet
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        from_time: NaiveTime,
        to_time: NaiveTime,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            from_time,
            to_time,
            status: TaskStatus::Pending,
            report: String::new(),
            attachments: Vec::new(),
        }
    }

    /// Copy of this task carrying a different id
    pub fn with_id(&self, id: u32) -> Self {
        Self { id, ..self.clone() }
    }

    /// True when the id belongs to a recurring series
    pub fn is_series(&self) -> bool {
        is_series_id(self.id)
    }

    /// Mark the task done, replacing the report when one is given
    pub fn mark_done(&mut self, report: Option<String>) {
        self.status = TaskStatus::Done;
        if let Some(report) = report {
            self.report = report;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

pub fn is_series_id(id: u32) -> bool {
    id > ONE_OFF_POOL_MAX
}

/// Parse a time of day in `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff` form.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Serde adapter storing `NaiveTime` as an ISO local-time string.
///
/// Fractional seconds are only written when non-zero.
mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S%.f").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time of day '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn series_boundary_is_exclusive() {
        assert!(!is_series_id(ONE_OFF_POOL_MAX));
        assert!(is_series_id(ONE_OFF_POOL_MAX + 1));
        assert!(is_series_id(DEFAULT_SERIES_ID));
    }

    #[test]
    fn parses_short_and_long_time_forms() {
        assert_eq!(parse_time_of_day("09:30"), Some(hm(9, 30)));
        assert_eq!(parse_time_of_day("09:30:15"), NaiveTime::from_hms_opt(9, 30, 15));
        assert_eq!(
            parse_time_of_day("09:30:15.250"),
            NaiveTime::from_hms_milli_opt(9, 30, 15, 250)
        );
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day("noon"), None);
    }

    #[test]
    fn serializes_with_app_field_names() {
        let mut task = Task::new("Standup", "daily sync", hm(9, 0), hm(9, 15)).with_id(3);
        task.attachments.push("content://docs/1".to_string());

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["fromTime"], "09:00:00");
        assert_eq!(value["toTime"], "09:15:00");
        assert_eq!(value["status"], "PENDING");
        assert_eq!(value["attachments"][0], "content://docs/1");
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let raw = r#"{"title":"Gym","description":"","fromTime":"18:00","toTime":"19:00"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, 0);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.report.is_empty());
        assert!(task.attachments.is_empty());
        assert_eq!(task.from_time, hm(18, 0));
    }

    #[test]
    fn mark_done_keeps_report_when_none_given() {
        let mut task = Task::new("Read", "", hm(20, 0), hm(21, 0));
        task.report = "chapter 1".to_string();
        task.mark_done(None);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.report, "chapter 1");

        task.mark_done(Some("chapter 2".to_string()));
        assert_eq!(task.report, "chapter 2");
    }

    #[test]
    fn pending_sorts_before_done() {
        assert!(TaskStatus::Pending < TaskStatus::Done);
    }
}
