//! Recurring series expansion
//!
//! A series is one template task materialised on every matching weekday of
//! an inclusive date range. All occurrences share a single id taken from the
//! series allocator, which is advanced once per series regardless of how
//! many occurrences are written.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::info;

use crate::allocator::SeriesAllocator;
use crate::error::{Error, Result};
use crate::store::{Occurrence, TaskStore};
use crate::task::Task;

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Set of weekdays, Monday first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        ALL_WEEKDAYS.into_iter().collect()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(|day| self.contains(*day))
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl FromStr for WeekdaySet {
    type Err = Error;

    /// Parse a comma-separated list such as `mon,wed,fri`.
    ///
    /// `weekdays`, `weekends` and `all` are accepted as shorthands.
    fn from_str(raw: &str) -> Result<Self> {
        let mut set = Self::empty();
        for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            match item.to_ascii_lowercase().as_str() {
                "all" | "daily" => ALL_WEEKDAYS.iter().for_each(|d| set.insert(*d)),
                "weekdays" => ALL_WEEKDAYS[..5].iter().for_each(|d| set.insert(*d)),
                "weekends" => ALL_WEEKDAYS[5..].iter().for_each(|d| set.insert(*d)),
                other => set.insert(parse_weekday(other).ok_or_else(|| {
                    Error::InvalidArgument(format!("unknown weekday '{item}'"))
                })?),
            }
        }
        if set.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one weekday is required".to_string(),
            ));
        }
        Ok(set)
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .iter()
            .map(|day| day.to_string().to_ascii_lowercase())
            .collect();
        f.write_str(&names.join(","))
    }
}

fn parse_weekday(value: &str) -> Option<Weekday> {
    match value {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Outcome of scheduling a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub id: u32,
    pub dates: Vec<NaiveDate>,
}

/// Materialise `template` on each day in `from..=to` whose weekday is in
/// `weekdays`
///
/// The series id is allocated before any occurrence is written, even when
/// no day matches. Repeating a call schedules a second, independent series.
pub fn add_repeated_tasks(
    store: &TaskStore,
    allocator: &SeriesAllocator,
    from: NaiveDate,
    to: NaiveDate,
    weekdays: WeekdaySet,
    template: &Task,
) -> Result<Series> {
    let id = allocator.allocate()?;
    let occurrence = template.with_id(id);

    let mut dates = Vec::new();
    for date in from.iter_days().take_while(|date| *date <= to) {
        if !weekdays.contains(date.weekday()) {
            continue;
        }
        store.add_task(date, occurrence.clone(), Occurrence::Series)?;
        dates.push(date);
    }

    info!(series_id = id, %from, %to, %weekdays, occurrences = dates.len(), "Scheduled series");
    Ok(Series { id, dates })
}
