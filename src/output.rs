//! Human and JSON rendering for taskday commands
//!
//! Each command builds a serializable report plus a [`HumanOutput`]. With
//! `--json` the report goes to stdout inside a versioned envelope; otherwise
//! the human form is printed unless `--quiet` is set.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::Task;

pub const SCHEMA_VERSION: &str = "taskday.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Header line followed by optional titled sections
#[derive(Debug, Clone, Default)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    /// Add a task as a detail line, rendered by [`task_line`]
    pub fn push_task(&mut self, task: &Task) {
        self.details.push(task_line(task));
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

/// Envelope shared by success and error payloads
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    #[serde(flatten)]
    payload: Payload<'a, T>,
    #[serde(skip_serializing_if = "is_empty")]
    warnings: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    next_steps: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Payload<'a, T: Serialize> {
    Data(&'a T),
    Error(ErrorBody),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

fn is_empty(items: &&[String]) -> bool {
    items.is_empty()
}

fn print_envelope<T: Serialize>(envelope: &Envelope<'_, T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let (warnings, next_steps) = match human {
            Some(h) => (h.warnings.as_slice(), h.next_steps.as_slice()),
            None => (&[][..], &[][..]),
        };
        return print_envelope(&Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            payload: Payload::Data(data),
            warnings,
            next_steps,
        });
    }

    if options.quiet {
        return Ok(());
    }
    if let Some(human) = human {
        println!("{}", format_human(human));
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    if json {
        return print_envelope::<()>(&Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            payload: Payload::Error(ErrorBody {
                message: err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
            }),
            warnings: &[],
            next_steps: &next_steps,
        });
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let summary: Vec<String> = output
        .summary
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                key.clone()
            } else {
                format!("{key}: {value}")
            }
        })
        .collect();
    let sections = [
        ("Summary", &summary),
        ("Details", &output.details),
        ("Warnings", &output.warnings),
        ("Next steps", &output.next_steps),
    ];

    let mut lines = vec![output.header.clone()];
    for (title, items) in sections.into_iter().filter(|(_, items)| !items.is_empty()) {
        lines.push(String::new());
        lines.push(format!("{title}:"));
        lines.extend(items.iter().map(|item| format!("- {item}")));
    }
    lines.join("\n")
}

/// One-line rendering of a task, e.g. `[3] 09:00-09:30 Standup (done)`
pub fn task_line(task: &Task) -> String {
    let mut line = format!(
        "[{}] {}-{} {}",
        task.id,
        task.from_time.format("%H:%M"),
        task.to_time.format("%H:%M"),
        task.title
    );
    if !task.is_pending() {
        line.push_str(&format!(" ({})", task.status));
    }
    if !task.attachments.is_empty() {
        line.push_str(&format!(" +{} attachment(s)", task.attachments.len()));
    }
    line
}

pub fn infer_command_name_from_args() -> String {
    let mut args = std::env::args().skip(1);
    let mut skip_value = false;

    for arg in args.by_ref() {
        if skip_value {
            skip_value = false;
            continue;
        }
        if arg == "--root" {
            skip_value = true;
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return arg;
    }

    "taskday".to_string()
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        2 => "user_error",
        3 => "capacity_blocked",
        _ => "operation_failed",
    }
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::PoolExhausted(date) => vec![format!("taskday list --date {date}")],
        Error::TaskNotFound { date, .. } => vec![format!("taskday list --date {date}")],
        Error::CorruptStore { path, .. } => {
            vec![format!("inspect or remove {}", path.display())]
        }
        Error::InvalidConfig(_) => vec!["fix taskday.toml then retry".to_string()],
        Error::LockFailed(_) => vec!["retry once other taskday processes finish".to_string()],
        _ => Vec::new(),
    }
}
