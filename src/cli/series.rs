//! Series commands: repeat, rm-future, next-id

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::range_delete::delete_series_from;
use crate::recurrence::{add_repeated_tasks, WeekdaySet};
use crate::task::{is_series_id, Task};

use super::Context;

/// Options for the repeat command
pub struct RepeatOptions {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: WeekdaySet,
    pub from: NaiveTime,
    pub to: Option<NaiveTime>,
    pub description: String,
}

#[derive(Serialize)]
struct RepeatReport {
    series_id: u32,
    weekdays: String,
    start: NaiveDate,
    end: NaiveDate,
    occurrences: usize,
    dates: Vec<NaiveDate>,
}

#[derive(Serialize)]
struct NextIdReport {
    next_series_id: u32,
}

pub fn run_repeat(ctx: &Context, options: RepeatOptions) -> Result<()> {
    if options.start > options.end {
        return Err(Error::InvalidArgument(format!(
            "start {} is after end {}",
            options.start, options.end
        )));
    }
    if options.title.trim().is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }
    let to = ctx.end_time(options.from, options.to)?;

    let template = Task::new(options.title, options.description, options.from, to);
    let allocator = ctx.store.allocator();
    let series = add_repeated_tasks(
        &ctx.store,
        &allocator,
        options.start,
        options.end,
        options.days,
        &template,
    )?;

    let mut human = HumanOutput::new(format!(
        "taskday repeat: scheduled series {} on {} day(s)",
        series.id,
        series.dates.len()
    ));
    human.push_summary("range", format!("{}..={}", options.start, options.end));
    human.push_summary("weekdays", options.days.to_string());
    for date in &series.dates {
        human.push_detail(date.to_string());
    }
    if series.dates.is_empty() {
        human.push_warning("no day in the range falls on the selected weekdays");
    }
    human.push_next_step(format!("taskday rm-future {} --date <day>", series.id));

    let report = RepeatReport {
        series_id: series.id,
        weekdays: options.days.to_string(),
        start: options.start,
        end: options.end,
        occurrences: series.dates.len(),
        dates: series.dates,
    };
    emit_success(ctx.output, "repeat", &report, Some(&human))
}

pub fn run_rm_future(ctx: &Context, id: u32, date: NaiveDate) -> Result<()> {
    let outcome = delete_series_from(&ctx.store, date, id)?;

    let mut human = HumanOutput::new(format!(
        "taskday rm-future: removed series {id} from {} day(s)",
        outcome.removed_from.len()
    ));
    human.push_summary("from", date.to_string());
    for day in &outcome.removed_from {
        human.push_detail(day.to_string());
    }
    if !is_series_id(id) {
        human.push_warning(format!("{id} is a one-off id; use `taskday rm` instead"));
    }

    emit_success(ctx.output, "rm-future", &outcome, Some(&human))
}

pub fn run_next_id(ctx: &Context) -> Result<()> {
    let next = ctx.store.allocator().current()?;

    if !ctx.output.json && !ctx.output.quiet {
        println!("{next}");
        return Ok(());
    }
    emit_success(ctx.output, "next-id", &NextIdReport { next_series_id: next }, None)
}
