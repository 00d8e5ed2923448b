//! Bulk removal of a series from a start date onwards
//!
//! Every existing day file is enumerated (a linear scan over the tasks
//! directory) and the series record is removed from each day on or after the
//! start date. Earlier days are never touched, and days without the series
//! are left as they are on disk. Each day is rewritten independently, so a failure part-way leaves the days already processed
//! updated.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::TaskStore;
use crate::task::{is_series_id, Task};

/// Outcome of a range deletion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeDeletion {
    pub series_id: u32,
    /// Days that actually held a record of the series
    pub removed_from: Vec<NaiveDate>,
}

/// Remove `task`'s series from `start` and every later day
///
/// One-off ids (`<= 118`) are ignored: nothing is read or written.
pub fn delete_with_future_tasks(
    store: &TaskStore,
    start: NaiveDate,
    task: &Task,
) -> Result<RangeDeletion> {
    delete_series_from(store, start, task.id)
}

/// Remove series `series_id` from `start` and every later day
pub fn delete_series_from(
    store: &TaskStore,
    start: NaiveDate,
    series_id: u32,
) -> Result<RangeDeletion> {
    let mut outcome = RangeDeletion {
        series_id,
        removed_from: Vec::new(),
    };

    if !is_series_id(series_id) {
        debug!(id = series_id, "Not a series id; nothing to delete");
        return Ok(outcome);
    }

    for key in store.list_days()? {
        if !key.is_on_or_after(start) {
            continue;
        }
        if store.delete_task(key.date(), series_id)? {
            outcome.removed_from.push(key.date());
        }
    }

    info!(
        series_id,
        %start,
        days = outcome.removed_from.len(),
        "Deleted series occurrences"
    );
    Ok(outcome)
}
