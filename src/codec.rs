//! Record codec for day files and the series counter file
//!
//! Both formats are pretty-printed JSON. Unknown keys are ignored on read;
//! anything that fails to decode is reported as [`Error::CorruptStore`] and
//! never coerced into an empty list.

use std::path::Path;

use crate::error::{Error, Result};
use crate::task::Task;

/// Encode an ordered task list as pretty-printed JSON
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Decode a day file's contents
///
/// `origin` is only used to label the error.
pub fn decode_tasks(bytes: &[u8], origin: &Path) -> Result<Vec<Task>> {
    serde_json::from_slice(bytes).map_err(|err| corrupt(origin, err))
}

/// Encode the series counter as a bare JSON integer
pub fn encode_counter(value: u32) -> Result<String> {
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn decode_counter(bytes: &[u8], origin: &Path) -> Result<u32> {
    serde_json::from_slice(bytes).map_err(|err| corrupt(origin, err))
}

fn corrupt(origin: &Path, err: serde_json::Error) -> Error {
    Error::CorruptStore {
        path: origin.to_path_buf(),
        reason: err.to_string(),
    }
}
