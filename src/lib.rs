//! taskday - per-day task store
//!
//! This library provides the core of the taskday CLI: a file-backed store
//! keeping one task file per calendar day.
//!
//! # Core Concepts
//!
//! - **Day files**: `tasks/DD_MM_YYYY.task`, sorted by start time, absent
//!   when the day is empty
//! - **One-off ids**: `1..=118`, unique within a day and reused across days
//! - **Series ids**: above 118, issued once per recurring series by a
//!   persisted counter and shared by every occurrence
//! - **Range deletion**: dropping a series from a date onwards
//!
//! # Module Organization
//!
//! - `task`: Task record model
//! - `codec`: Encoding of day files and the series counter
//! - `day_key`: Date to file-name mapping
//! - `store`: Day store with per-day locking
//! - `allocator`: Series id allocator
//! - `recurrence`: Series expansion over weekdays
//! - `range_delete`: Series removal from a date onwards
//! - `agenda`: Focus view and refresh cadence
//! - `config`: Configuration loading from `taskday.toml`
//! - `lock`: File locking and atomic writes
//! - `cli`: Command-line interface using clap
//! - `output`: Human and JSON output
//! - `error`: Error types and result aliases

pub mod agenda;
pub mod allocator;
pub mod cli;
pub mod codec;
pub mod config;
pub mod day_key;
pub mod error;
pub mod lock;
pub mod output;
pub mod range_delete;
pub mod recurrence;
pub mod store;
pub mod task;

pub use error::{Error, Result};
