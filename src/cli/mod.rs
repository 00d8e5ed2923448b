//! Command-line interface for taskday
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the submodules.

use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::day_key::DayKey;
use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::recurrence::WeekdaySet;
use crate::store::TaskStore;
use crate::task::parse_time_of_day;

mod agenda;
mod series;
mod task;

/// taskday - per-day task planner
///
/// Stores one task file per calendar day, with one-off tasks and recurring
/// weekday series.
#[derive(Parser, Debug)]
#[command(name = "taskday")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding tasks/ and task.cfg
    #[arg(long, global = true, env = "TASKDAY_ROOT")]
    pub root: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a one-off task to a day
    Add {
        /// Task title
        title: String,

        /// Day (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(long, default_value = "today", value_parser = parse_date)]
        date: NaiveDate,

        /// Start time (HH:MM or HH:MM:SS)
        #[arg(long, value_parser = parse_time)]
        from: NaiveTime,

        /// End time (defaults to start plus the configured duration)
        #[arg(long, value_parser = parse_time)]
        to: Option<NaiveTime>,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Attachment locator (repeatable)
        #[arg(long = "attach")]
        attachments: Vec<String>,
    },

    /// List the tasks of a day
    List {
        /// Day to list
        #[arg(long, default_value = "today", value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Edit an existing task
    Update {
        /// Task id
        id: u32,

        /// Day holding the task
        #[arg(long, default_value = "today", value_parser = parse_date)]
        date: NaiveDate,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New start time
        #[arg(long, value_parser = parse_time)]
        from: Option<NaiveTime>,

        /// New end time
        #[arg(long, value_parser = parse_time)]
        to: Option<NaiveTime>,

        /// Attachment locator to append (repeatable)
        #[arg(long = "attach")]
        attachments: Vec<String>,

        /// Drop existing attachments before appending
        #[arg(long)]
        clear_attachments: bool,
    },

    /// Mark a task as done
    Done {
        /// Task id
        id: u32,

        /// Day holding the task
        #[arg(long, default_value = "today", value_parser = parse_date)]
        date: NaiveDate,

        /// Completion report
        #[arg(long)]
        report: Option<String>,
    },

    /// Remove a task from a single day
    Rm {
        /// Task id
        id: u32,

        /// Day holding the task
        #[arg(long, default_value = "today", value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Schedule a recurring series on selected weekdays
    Repeat {
        /// Task title
        title: String,

        /// First day of the range (inclusive)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        /// Last day of the range (inclusive)
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,

        /// Weekdays, e.g. "mon,wed,fri", "weekdays", "all"
        #[arg(long, value_parser = parse_weekdays)]
        days: WeekdaySet,

        /// Start time
        #[arg(long, value_parser = parse_time)]
        from: NaiveTime,

        /// End time (defaults to start plus the configured duration)
        #[arg(long, value_parser = parse_time)]
        to: Option<NaiveTime>,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Remove a series from a day and every later day
    RmFuture {
        /// Series id
        id: u32,

        /// First day to remove from
        #[arg(long, default_value = "today", value_parser = parse_date)]
        date: NaiveDate,
    },

    /// List the days that have tasks
    Days,

    /// Show the tasks that need attention right now
    Now {
        /// Keep refreshing at every minute boundary
        #[arg(long)]
        watch: bool,
    },

    /// Show the next series id
    NextId,

    /// Delete every day file and reset the series counter
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Resolved store, config and output settings shared by commands
pub(crate) struct Context {
    pub store: TaskStore,
    pub config: Config,
    pub output: OutputOptions,
}

impl Context {
    fn open(root: Option<PathBuf>, json: bool, quiet: bool) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => default_root()?,
        };
        let config = Config::load_from_root(&root)?;
        let store = TaskStore::open(&root, &config)?;
        tracing::debug!(root = %root.display(), "Opened task store");
        Ok(Self {
            store,
            config,
            output: OutputOptions { json, quiet },
        })
    }

    /// End time for a task starting at `from`, validated to be after it
    pub fn end_time(&self, from: NaiveTime, to: Option<NaiveTime>) -> Result<NaiveTime> {
        let to = match to {
            Some(to) => to,
            None => {
                let minutes = i64::from(self.config.tasks.default_duration_minutes);
                let (end, wrapped) = from.overflowing_add_signed(Duration::minutes(minutes));
                if wrapped != 0 {
                    return Err(Error::InvalidArgument(format!(
                        "default duration from {} runs past midnight; pass --to",
                        from.format("%H:%M")
                    )));
                }
                end
            }
        };
        ensure_ordered(from, to)?;
        Ok(to)
    }
}

pub(crate) fn ensure_ordered(from: NaiveTime, to: NaiveTime) -> Result<()> {
    if from >= to {
        return Err(Error::InvalidArgument(format!(
            "start {} must be before end {}",
            from.format("%H:%M:%S"),
            to.format("%H:%M:%S")
        )));
    }
    Ok(())
}

fn default_root() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "taskday")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            Error::InvalidArgument(
                "cannot determine a data directory; pass --root or set TASKDAY_ROOT".to_string(),
            )
        })
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    let date = match raw.trim().to_ascii_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.succ_opt(),
        "yesterday" => today.pred_opt(),
        other => Some(
            NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map_err(|_| format!("invalid date '{raw}' (expected YYYY-MM-DD)"))?,
        ),
    }
    .ok_or_else(|| "date out of range".to_string())?;
    DayKey::try_new(date).map_err(|err| err.to_string())?;
    Ok(date)
}

fn parse_time(raw: &str) -> std::result::Result<NaiveTime, String> {
    parse_time_of_day(raw).ok_or_else(|| format!("invalid time '{raw}' (expected HH:MM)"))
}

fn parse_weekdays(raw: &str) -> std::result::Result<WeekdaySet, String> {
    raw.parse().map_err(|err: Error| err.to_string())
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = Context::open(self.root, self.json, self.quiet)?;

        match self.command {
            Commands::Add {
                title,
                date,
                from,
                to,
                description,
                attachments,
            } => task::run_add(
                &ctx,
                task::AddOptions {
                    title,
                    date,
                    from,
                    to,
                    description,
                    attachments,
                },
            ),
            Commands::List { date } => task::run_list(&ctx, date),
            Commands::Update {
                id,
                date,
                title,
                description,
                from,
                to,
                attachments,
                clear_attachments,
            } => task::run_update(
                &ctx,
                task::UpdateOptions {
                    id,
                    date,
                    title,
                    description,
                    from,
                    to,
                    attachments,
                    clear_attachments,
                },
            ),
            Commands::Done { id, date, report } => task::run_done(&ctx, id, date, report),
            Commands::Rm { id, date } => task::run_rm(&ctx, id, date),
            Commands::Repeat {
                title,
                start,
                end,
                days,
                from,
                to,
                description,
            } => series::run_repeat(
                &ctx,
                series::RepeatOptions {
                    title,
                    start,
                    end,
                    days,
                    from,
                    to,
                    description,
                },
            ),
            Commands::RmFuture { id, date } => series::run_rm_future(&ctx, id, date),
            Commands::Days => agenda::run_days(&ctx),
            Commands::Now { watch } => agenda::run_now(&ctx, watch),
            Commands::NextId => series::run_next_id(&ctx),
            Commands::Clear { yes } => agenda::run_clear(&ctx, yes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relative_and_iso_dates() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date("today").unwrap(), today);
        assert_eq!(parse_date("Tomorrow").unwrap(), today.succ_opt().unwrap());
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("+10000-01-05").is_err());
        assert!(parse_date("-0001-01-05").is_err());
        assert!(parse_date("9999-12-31").is_ok());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn end_time_defaults_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::open(Some(dir.path().to_path_buf()), false, true).unwrap();
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        assert_eq!(
            ctx.end_time(nine, None).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap()
        );
        assert!(ctx.end_time(nine, Some(nine)).is_err());

        let late = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        assert!(matches!(ctx.end_time(late, None), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
