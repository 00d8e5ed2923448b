//! Derived views over a day's tasks
//!
//! The focus view picks which tasks deserve attention at a given time of day:
//! pending tasks running now, else pending tasks already started, else
//! pending tasks still ahead, else the whole day.

use std::time::Duration;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusKind {
    Current,
    Previous,
    Next,
    All,
}

impl FocusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusKind::Current => "current",
            FocusKind::Previous => "previous",
            FocusKind::Next => "next",
            FocusKind::All => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Focus {
    pub kind: FocusKind,
    pub tasks: Vec<Task>,
}

impl Focus {
    /// Select the focus tasks for `now` from one day's tasks
    pub fn select(tasks: &[Task], now: NaiveTime) -> Self {
        let mut day = tasks.to_vec();
        sort_for_display(&mut day);

        let pending = || day.iter().filter(|task| task.is_pending());

        let current: Vec<Task> = pending()
            .filter(|task| task.from_time <= now && now <= task.to_time)
            .cloned()
            .collect();
        if !current.is_empty() {
            return Self::new(FocusKind::Current, current);
        }

        let previous: Vec<Task> = pending()
            .filter(|task| task.from_time < now)
            .cloned()
            .collect();
        if !previous.is_empty() {
            return Self::new(FocusKind::Previous, previous);
        }

        let next: Vec<Task> = pending()
            .filter(|task| task.to_time > now)
            .cloned()
            .collect();
        if !next.is_empty() {
            return Self::new(FocusKind::Next, next);
        }

        Self::new(FocusKind::All, day)
    }

    fn new(kind: FocusKind, tasks: Vec<Task>) -> Self {
        Self { kind, tasks }
    }
}

/// Stable sort putting pending tasks before done ones
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.status);
}

/// Time until the next wall-clock minute boundary after `now`
pub fn next_refresh_delay(now: NaiveTime) -> Duration {
    let elapsed_ms = u64::from(now.second()) * 1000 + u64::from(now.nanosecond().min(999_999_999)) / 1_000_000;
    Duration::from_millis(60_000u64.saturating_sub(elapsed_ms))
}
