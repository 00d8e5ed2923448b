//! Day keys: the mapping between calendar dates and day-file names
//!
//! Day files are named `DD_MM_YYYY.task`. Comparison always goes through
//! the parsed date, ordered by (year, month, day), never through the name.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};

/// Extension carried by every day file
pub const DAY_FILE_EXTENSION: &str = "task";

/// Years representable in the four-digit `YYYY` field of a day-file name
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// A calendar day identified by its day-file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Key for `date`, refusing dates whose file name would not parse back
    pub fn try_new(date: NaiveDate) -> Result<Self> {
        if !YEAR_RANGE.contains(&date.year()) {
            return Err(Error::InvalidArgument(format!(
                "date {date} is outside the supported years {}..={}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            )));
        }
        Ok(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// File name for this day, e.g. `07_03_2024.task`
    pub fn file_name(&self) -> String {
        format!(
            "{:02}_{:02}_{:04}.{}",
            self.0.day(),
            self.0.month(),
            self.0.year(),
            DAY_FILE_EXTENSION
        )
    }

    /// Parse a day-file name back into a key
    ///
    /// Returns `None` for anything that is not exactly `DD_MM_YYYY.task`
    /// with a real calendar date (lock files, temp files, stray entries).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(DAY_FILE_EXTENSION)?.strip_suffix('.')?;
        let bytes = stem.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'_' || bytes[5] != b'_' {
            return None;
        }
        let day = parse_digits(&stem[0..2])?;
        let month = parse_digits(&stem[3..5])?;
        let year = parse_digits(&stem[6..10])?;
        NaiveDate::from_ymd_opt(year as i32, month, day).map(Self)
    }

    /// True when this day falls on or after `start`
    pub fn is_on_or_after(&self, start: NaiveDate) -> bool {
        self.0 >= start
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_digits(raw: &str) -> Option<u32> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
