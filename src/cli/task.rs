//! Single-day task commands: add, list, update, done, rm

use chrono::NaiveDate;
use chrono::NaiveTime;
use serde::Serialize;

use crate::agenda::sort_for_display;
use crate::error::{Error, Result};
use crate::output::{emit_success, task_line, HumanOutput};
use crate::store::Occurrence;
use crate::task::{Task, TaskStatus};

use super::{ensure_ordered, Context};

/// Options for the add command
pub struct AddOptions {
    pub title: String,
    pub date: NaiveDate,
    pub from: NaiveTime,
    pub to: Option<NaiveTime>,
    pub description: String,
    pub attachments: Vec<String>,
}

/// Options for the update command
pub struct UpdateOptions {
    pub id: u32,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub description: Option<String>,
    pub from: Option<NaiveTime>,
    pub to: Option<NaiveTime>,
    pub attachments: Vec<String>,
    pub clear_attachments: bool,
}

#[derive(Serialize)]
struct DayTaskReport<'a> {
    date: NaiveDate,
    task: &'a Task,
}

#[derive(Serialize)]
struct ListReport<'a> {
    date: NaiveDate,
    total: usize,
    pending: usize,
    tasks: &'a [Task],
}

#[derive(Serialize)]
struct RemoveReport {
    date: NaiveDate,
    id: u32,
    removed: bool,
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let to = ctx.end_time(options.from, options.to)?;
    let title = non_empty_title(options.title)?;

    let mut task = Task::new(title, options.description, options.from, to);
    task.attachments = options.attachments;

    let stored = ctx.store.add_task(options.date, task, Occurrence::OneOff)?;

    let mut human = HumanOutput::new(format!("taskday add: added task {}", stored.id));
    human.push_summary("date", options.date.to_string());
    human.push_summary("task", task_line(&stored));
    human.push_next_step(format!("taskday list --date {}", options.date));

    emit_success(
        ctx.output,
        "add",
        &DayTaskReport {
            date: options.date,
            task: &stored,
        },
        Some(&human),
    )
}

pub fn run_list(ctx: &Context, date: NaiveDate) -> Result<()> {
    let mut tasks = ctx.store.read_tasks(date)?;
    sort_for_display(&mut tasks);
    let pending = tasks.iter().filter(|t| t.is_pending()).count();

    let mut human = HumanOutput::new(format!("taskday list: {date}"));
    human.push_summary("total", tasks.len().to_string());
    human.push_summary("pending", pending.to_string());
    for task in &tasks {
        human.push_task(task);
    }
    if tasks.is_empty() {
        human.push_next_step(format!("taskday add <title> --date {date} --from HH:MM"));
    }

    emit_success(
        ctx.output,
        "list",
        &ListReport {
            date,
            total: tasks.len(),
            pending,
            tasks: &tasks,
        },
        Some(&human),
    )
}

pub fn run_update(ctx: &Context, options: UpdateOptions) -> Result<()> {
    let title = options.title.map(non_empty_title).transpose()?;

    let task = ctx.store.edit_task(options.date, options.id, |task| {
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = options.description {
            task.description = description;
        }
        if let Some(from) = options.from {
            task.from_time = from;
        }
        if let Some(to) = options.to {
            task.to_time = to;
        }
        ensure_ordered(task.from_time, task.to_time)?;
        if options.clear_attachments {
            task.attachments.clear();
        }
        task.attachments.extend(options.attachments);
        Ok(())
    })?;

    let mut human = HumanOutput::new(format!("taskday update: updated task {}", task.id));
    human.push_summary("date", options.date.to_string());
    human.push_summary("task", task_line(&task));

    emit_success(
        ctx.output,
        "update",
        &DayTaskReport {
            date: options.date,
            task: &task,
        },
        Some(&human),
    )
}

pub fn run_done(ctx: &Context, id: u32, date: NaiveDate, report: Option<String>) -> Result<()> {
    let task = ctx.store.set_status(date, id, TaskStatus::Done, report)?;

    let mut human = HumanOutput::new(format!("taskday done: completed task {id}"));
    human.push_summary("date", date.to_string());
    human.push_summary("task", task_line(&task));
    if !task.report.is_empty() {
        human.push_summary("report", task.report.clone());
    }

    emit_success(ctx.output, "done", &DayTaskReport { date, task: &task }, Some(&human))
}

pub fn run_rm(ctx: &Context, id: u32, date: NaiveDate) -> Result<()> {
    let removed = ctx.store.delete_task(date, id)?;
    if !removed {
        return Err(Error::TaskNotFound { id, date });
    }

    let mut human = HumanOutput::new(format!("taskday rm: removed task {id}"));
    human.push_summary("date", date.to_string());
    if crate::task::is_series_id(id) {
        human.push_next_step(format!("taskday rm-future {id} --date {date}"));
    }

    emit_success(ctx.output, "rm", &RemoveReport { date, id, removed }, Some(&human))
}

fn non_empty_title(title: String) -> Result<String> {
    if title.trim().is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }
    Ok(title)
}
