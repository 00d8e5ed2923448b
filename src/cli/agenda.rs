//! Store-wide commands: days, now, clear

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::agenda::{next_refresh_delay, Focus};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};

use super::Context;

#[derive(Serialize)]
struct DaysReport {
    days: Vec<NaiveDate>,
    total: usize,
}

#[derive(Serialize)]
struct NowReport<'a> {
    date: NaiveDate,
    time: String,
    #[serde(flatten)]
    focus: &'a Focus,
}

#[derive(Serialize)]
struct ClearReport {
    removed_days: usize,
}

pub fn run_days(ctx: &Context) -> Result<()> {
    let days: Vec<NaiveDate> = ctx.store.list_days()?.iter().map(|key| key.date()).collect();

    let mut human = HumanOutput::new(format!("taskday days: {} day(s) with tasks", days.len()));
    for day in &days {
        human.push_detail(day.to_string());
    }

    emit_success(
        ctx.output,
        "days",
        &DaysReport {
            total: days.len(),
            days,
        },
        Some(&human),
    )
}

pub fn run_now(ctx: &Context, watch: bool) -> Result<()> {
    loop {
        emit_now(ctx)?;
        if !watch {
            return Ok(());
        }
        let delay = next_refresh_delay(Local::now().time());
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Waiting for next refresh");
        std::thread::sleep(delay);
    }
}

fn emit_now(ctx: &Context) -> Result<()> {
    let now = Local::now();
    let date = now.date_naive();
    let time = now.time();
    let tasks = ctx.store.read_tasks(date)?;
    let focus = Focus::select(&tasks, time);

    let mut human = HumanOutput::new(format!(
        "taskday now: {} {} ({})",
        date,
        time.format("%H:%M"),
        focus.kind.as_str()
    ));
    for task in &focus.tasks {
        human.push_task(task);
    }
    if focus.tasks.is_empty() {
        human.push_next_step("taskday add <title> --from HH:MM");
    }

    emit_success(
        ctx.output,
        "now",
        &NowReport {
            date,
            time: time.format("%H:%M:%S").to_string(),
            focus: &focus,
        },
        Some(&human),
    )
}

pub fn run_clear(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        return Err(Error::InvalidArgument(
            "refusing to delete all tasks without --yes".to_string(),
        ));
    }

    let removed_days = ctx.store.clear_all()?;

    let mut human = HumanOutput::new("taskday clear: store emptied");
    human.push_summary("removed days", removed_days.to_string());
    human.push_summary("root", ctx.store.root().display().to_string());

    emit_success(ctx.output, "clear", &ClearReport { removed_days }, Some(&human))
}
