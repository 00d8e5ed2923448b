//! Error types for taskday
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, invalid config)
//! - 3: Capacity blocked (one-off id pool exhausted for a day)
//! - 4: Operation failed (I/O, corrupt store, lock contention)

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Exit codes for the taskday CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const CAPACITY_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskday operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task {id} not found on {date}")]
    TaskNotFound { id: u32, date: NaiveDate },

    #[error("Series counter cannot move backwards: current {current}, requested {requested}")]
    CounterRegression { current: u32, requested: u32 },

    // Capacity (exit code 3)
    #[error("All one-off task ids are in use on {0}")]
    PoolExhausted(NaiveDate),

    // Operation failures (exit code 4)
    #[error("Corrupt store file {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::TaskNotFound { .. }
            | Error::CounterRegression { .. } => exit_codes::USER_ERROR,

            Error::PoolExhausted(_) => exit_codes::CAPACITY_BLOCKED,

            Error::CorruptStore { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::PoolExhausted(date) => Some(serde_json::json!({
                "date": date.to_string(),
                "pool_size": crate::task::ONE_OFF_POOL_MAX,
            })),
            Error::CorruptStore { path, .. } => Some(serde_json::json!({
                "path": path.display().to_string(),
            })),
            Error::TaskNotFound { id, date } => Some(serde_json::json!({
                "id": id,
                "date": date.to_string(),
            })),
            Error::CounterRegression { current, requested } => Some(serde_json::json!({
                "current": current,
                "requested": requested,
            })),
            _ => None,
        }
    }
}

/// Result type alias for taskday operations
pub type Result<T> = std::result::Result<T, Error>;
