//! Day store: one task file per calendar day
//!
//! # Directory Structure
//!
//! ```text
//! <root>/
//!   taskday.toml              # Optional configuration
//!   task.cfg                  # Next available series id (JSON integer)
//!   tasks/                    # One file per day that has tasks
//!     DD_MM_YYYY.task         # Pretty-printed JSON array, sorted by fromTime
//!   locks/                    # Lock files guarding read-modify-write cycles
//!     DD_MM_YYYY.lock
//!     task.cfg.lock
//! ```
//!
//! A day with no tasks has no file. Reads are lock-free because writes are
//! atomic renames; every mutation holds that day's lock from read to write.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::allocator::SeriesAllocator;
use crate::codec;
use crate::config::Config;
use crate::day_key::DayKey;
use crate::error::{Error, Result};
use crate::lock::{self, FileLock};
use crate::task::{Task, TaskStatus, ONE_OFF_POOL_MAX};

/// Directory holding the day files
pub const TASKS_DIR: &str = "tasks";

/// File holding the next available series id
pub const COUNTER_FILE: &str = "task.cfg";

/// Directory holding lock files
pub const LOCKS_DIR: &str = "locks";

/// How the id of a task passed to [`TaskStore::add_task`] is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// Assign the lowest free id from the day's one-off pool
    OneOff,
    /// Keep the series id already carried by the task
    Series,
}

/// File-backed store of per-day task lists
#[derive(Debug, Clone)]
pub struct TaskStore {
    root: PathBuf,
    lock_timeout_ms: u64,
}

impl TaskStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let store = Self::new(root, config.store.lock_timeout_ms);
        fs::create_dir_all(store.tasks_dir())?;
        Ok(store)
    }

    /// Construct a store handle without touching the filesystem
    pub fn new(root: impl Into<PathBuf>, lock_timeout_ms: u64) -> Self {
        Self {
            root: root.into(),
            lock_timeout_ms,
        }
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.root.join(TASKS_DIR)
    }

    pub fn counter_file(&self) -> PathBuf {
        self.root.join(COUNTER_FILE)
    }

    pub fn locks_dir(&self) -> PathBuf {
        self.root.join(LOCKS_DIR)
    }

    /// Path of the day file for `date` (which may not exist)
    ///
    /// Fails for dates whose year does not fit the `DD_MM_YYYY` name, so no
    /// file is ever written that [`TaskStore::list_days`] cannot see.
    pub fn day_file(&self, date: NaiveDate) -> Result<PathBuf> {
        Ok(self.tasks_dir().join(DayKey::try_new(date)?.file_name()))
    }

    fn day_lock_file(&self, date: NaiveDate) -> Result<PathBuf> {
        let name = DayKey::try_new(date)?.file_name();
        let stem = name.strip_suffix(".task").unwrap_or(&name);
        Ok(self.locks_dir().join(format!("{stem}.lock")))
    }

    /// Series allocator persisted beside the day files
    pub fn allocator(&self) -> SeriesAllocator {
        SeriesAllocator::new(
            self.counter_file(),
            self.locks_dir().join(format!("{COUNTER_FILE}.lock")),
            self.lock_timeout_ms,
        )
    }

    // =========================================================================
    // Day operations
    // =========================================================================

    /// Read the tasks stored for `date`; empty when the day has no file
    pub fn read_tasks(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let path = self.day_file(date)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::Io(err)),
        };
        codec::decode_tasks(&bytes, &path)
    }

    /// Replace the task list for `date`
    ///
    /// An empty list removes the day file. Otherwise tasks are stably sorted
    /// by start time before being written.
    pub fn write_tasks(&self, date: NaiveDate, tasks: Vec<Task>) -> Result<()> {
        let _lock = self.lock_day(date)?;
        self.write_day(date, tasks)
    }

    /// Ids currently occupied on `date`
    pub fn used_ids(&self, date: NaiveDate) -> Result<BTreeSet<u32>> {
        Ok(self.read_tasks(date)?.iter().map(|task| task.id).collect())
    }

    /// Add a task to `date` and return the record as stored
    ///
    /// One-off tasks get the lowest id in `1..=118` not used on that day;
    /// [`Error::PoolExhausted`] is returned when none is left. Series
    /// occurrences keep their id.
    pub fn add_task(&self, date: NaiveDate, task: Task, occurrence: Occurrence) -> Result<Task> {
        self.modify_day(date, |tasks| {
            let id = match occurrence {
                Occurrence::OneOff => {
                    let used: BTreeSet<u32> = tasks.iter().map(|t| t.id).collect();
                    first_free_one_off_id(&used).ok_or(Error::PoolExhausted(date))?
                }
                Occurrence::Series => task.id,
            };
            let stored = task.with_id(id);
            debug!(%date, id, title = %stored.title, "Adding task");
            tasks.push(stored.clone());
            Ok(stored)
        })
    }

    /// Replace the record sharing `task.id` on `date`, inserting when absent
    pub fn update_task(&self, date: NaiveDate, task: Task) -> Result<()> {
        self.modify_day(date, |tasks| {
            let before = tasks.len();
            tasks.retain(|t| t.id != task.id);
            if tasks.len() == before {
                debug!(%date, id = task.id, "Update found no existing record; inserting");
            }
            tasks.push(task);
            Ok(())
        })
    }

    /// Remove the record with `id` from `date`
    ///
    /// Returns whether a record was removed. Removing the last task deletes
    /// the day file.
    pub fn delete_task(&self, date: NaiveDate, id: u32) -> Result<bool> {
        self.modify_day(date, |tasks| {
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            Ok(tasks.len() != before)
        })
    }

    /// Set the status (and optionally the report) of an existing task
    pub fn set_status(
        &self,
        date: NaiveDate,
        id: u32,
        status: TaskStatus,
        report: Option<String>,
    ) -> Result<Task> {
        self.modify_day(date, |tasks| {
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(Error::TaskNotFound { id, date })?;
            match status {
                TaskStatus::Done => task.mark_done(report),
                TaskStatus::Pending => {
                    task.status = TaskStatus::Pending;
                    if let Some(report) = report {
                        task.report = report;
                    }
                }
            }
            Ok(task.clone())
        })
    }

    /// Apply `edit` to the record with `id` on `date` under the day lock
    ///
    /// Returns the edited record, or [`Error::TaskNotFound`] without writing.
    /// An error from `edit` also leaves the day untouched.
    pub fn edit_task<F>(&self, date: NaiveDate, id: u32, edit: F) -> Result<Task>
    where
        F: FnOnce(&mut Task) -> Result<()>,
    {
        self.modify_day(date, |tasks| {
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(Error::TaskNotFound { id, date })?;
            edit(task)?;
            task.id = id;
            Ok(task.clone())
        })
    }

    /// Days that currently have a file, in date order
    ///
    /// Entries whose names are not day-file names are skipped.
    pub fn list_days(&self) -> Result<Vec<DayKey>> {
        let dir = self.tasks_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::Io(err)),
        };

        let mut days = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(DayKey::from_file_name) {
                Some(key) => days.push(key),
                None => debug!(entry = ?name, "Skipping non day-file entry"),
            }
        }
        days.sort();
        Ok(days)
    }

    /// Remove every day file, the series counter and the lock files
    ///
    /// Returns the number of day files removed. The next counter access
    /// recreates it with its default. Must not run alongside other writers,
    /// since their lock files are unlinked.
    pub fn clear_all(&self) -> Result<usize> {
        let days = self.list_days()?;
        let tasks_dir = self.tasks_dir();
        if tasks_dir.exists() {
            fs::remove_dir_all(&tasks_dir)?;
        }
        fs::create_dir_all(&tasks_dir)?;

        match fs::remove_file(self.counter_file()) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(Error::Io(err)),
        }

        match fs::remove_dir_all(self.locks_dir()) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(Error::Io(err)),
        }

        info!(root = %self.root.display(), removed = days.len(), "Cleared task store");
        Ok(days.len())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_day(&self, date: NaiveDate) -> Result<FileLock> {
        FileLock::acquire(self.day_lock_file(date)?, self.lock_timeout_ms)
    }

    /// Run `f` over the day's tasks while holding the day lock, then persist
    ///
    /// The file is left byte-for-byte alone when `f` changes nothing, which
    /// keeps fields this version does not know about.
    fn modify_day<T, F>(&self, date: NaiveDate, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<T>,
    {
        let _lock = self.lock_day(date)?;
        let mut tasks = self.read_tasks(date)?;
        let before = tasks.clone();
        let result = f(&mut tasks)?;
        if tasks == before {
            debug!(%date, "Day unchanged; skipping write");
        } else {
            self.write_day(date, tasks)?;
        }
        Ok(result)
    }

    fn write_day(&self, date: NaiveDate, mut tasks: Vec<Task>) -> Result<()> {
        let path = self.day_file(date)?;

        if tasks.is_empty() {
            match fs::remove_file(&path) {
                Ok(()) => info!(%date, "Removed empty day file"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(Error::Io(err)),
            }
            return Ok(());
        }

        sort_by_start(&mut tasks);
        let content = codec::encode_tasks(&tasks)?;
        lock::write_atomic(&path, content.as_bytes())?;
        debug!(%date, count = tasks.len(), "Wrote day file");
        Ok(())
    }
}

/// Lowest id in the one-off pool that is not in `used`
pub fn first_free_one_off_id(used: &BTreeSet<u32>) -> Option<u32> {
    (1..=ONE_OFF_POOL_MAX).find(|id| !used.contains(id))
}

/// Stable sort by start time
pub fn sort_by_start(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.from_time);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TaskStore) {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::open(dir.path(), &Config::default()).unwrap();
        (dir, store)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn task(title: &str, from: u32) -> Task {
        Task::new(title, "", at(from, 0), at(from, 30))
    }

    #[test]
    fn paths_follow_layout() {
        let (dir, store) = setup();
        assert_eq!(store.tasks_dir(), dir.path().join("tasks"));
        assert_eq!(store.counter_file(), dir.path().join("task.cfg"));
        assert_eq!(store.day_file(day()).unwrap(), dir.path().join("tasks/05_06_2024.task"));
        assert_eq!(store.day_lock_file(day()).unwrap(), dir.path().join("locks/05_06_2024.lock"));
    }

    #[test]
    fn missing_day_reads_empty() {
        let (_dir, store) = setup();
        assert!(store.read_tasks(day()).unwrap().is_empty());
        assert!(store.used_ids(day()).unwrap().is_empty());
    }

    #[test]
    fn write_sorts_by_start_time_stably() {
        let (_dir, store) = setup();
        let late = task("late", 15).with_id(1);
        let early_a = task("early-a", 9).with_id(2);
        let early_b = task("early-b", 9).with_id(3);
        store
            .write_tasks(day(), vec![late, early_a, early_b])
            .unwrap();

        let titles: Vec<_> = store
            .read_tasks(day())
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["early-a", "early-b", "late"]);
    }

    #[test]
    fn empty_write_removes_file_and_is_noop_without_file() {
        let (_dir, store) = setup();
        store.write_tasks(day(), Vec::new()).unwrap();
        assert!(!store.day_file(day()).unwrap().exists());

        store.write_tasks(day(), vec![task("a", 8).with_id(1)]).unwrap();
        assert!(store.day_file(day()).unwrap().exists());

        store.write_tasks(day(), Vec::new()).unwrap();
        assert!(!store.day_file(day()).unwrap().exists());
    }

    #[test]
    fn one_off_ids_are_sequential() {
        let (_dir, store) = setup();
        for expected in 1..=5 {
            let stored = store.add_task(day(), task("t", 8), Occurrence::OneOff).unwrap();
            assert_eq!(stored.id, expected);
        }
    }

    #[test]
    fn one_off_id_fills_the_lowest_hole() {
        let (_dir, store) = setup();
        store
            .write_tasks(day(), vec![task("a", 8).with_id(1), task("c", 9).with_id(3)])
            .unwrap();

        let stored = store.add_task(day(), task("b", 10), Occurrence::OneOff).unwrap();
        assert_eq!(stored.id, 2);
    }

    #[test]
    fn one_off_ids_ignore_other_days() {
        let (_dir, store) = setup();
        let other = day().succ_opt().unwrap();
        store.add_task(other, task("x", 8), Occurrence::OneOff).unwrap();
        store.add_task(other, task("y", 8), Occurrence::OneOff).unwrap();

        let stored = store.add_task(day(), task("z", 8), Occurrence::OneOff).unwrap();
        assert_eq!(stored.id, 1);
    }

    #[test]
    fn series_ids_do_not_consume_pool_slots() {
        let (_dir, store) = setup();
        store
            .add_task(day(), task("series", 7).with_id(150), Occurrence::Series)
            .unwrap();
        let stored = store.add_task(day(), task("once", 8), Occurrence::OneOff).unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(store.used_ids(day()).unwrap(), BTreeSet::from([1, 150]));
    }

    #[test]
    fn pool_exhaustion_fails_without_writing() {
        let (_dir, store) = setup();
        let full: Vec<Task> = (1..=ONE_OFF_POOL_MAX).map(|id| task("t", 8).with_id(id)).collect();
        store.write_tasks(day(), full).unwrap();
        let before = fs::read(store.day_file(day()).unwrap()).unwrap();

        let err = store.add_task(day(), task("extra", 9), Occurrence::OneOff).unwrap_err();
        assert!(matches!(err, Error::PoolExhausted(d) if d == day()));
        assert_eq!(fs::read(store.day_file(day()).unwrap()).unwrap(), before);

        // Series occurrences are not limited by the pool.
        store
            .add_task(day(), task("series", 9).with_id(121), Occurrence::Series)
            .unwrap();
        assert_eq!(store.read_tasks(day()).unwrap().len(), 119);
    }

    #[test]
    fn update_replaces_existing_record() {
        let (_dir, store) = setup();
        let stored = store.add_task(day(), task("draft", 8), Occurrence::OneOff).unwrap();

        let mut edited = stored.clone();
        edited.title = "final".to_string();
        edited.from_time = at(11, 0);
        edited.to_time = at(12, 0);
        store.update_task(day(), edited.clone()).unwrap();

        assert_eq!(store.read_tasks(day()).unwrap(), vec![edited]);
    }

    #[test]
    fn update_inserts_when_absent() {
        let (_dir, store) = setup();
        store.update_task(day(), task("new", 8).with_id(7)).unwrap();
        let tasks = store.read_tasks(day()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 7);
    }

    #[test]
    fn delete_removes_only_matching_record() {
        let (_dir, store) = setup();
        store.add_task(day(), task("a", 8), Occurrence::OneOff).unwrap();
        store.add_task(day(), task("b", 9), Occurrence::OneOff).unwrap();

        assert!(store.delete_task(day(), 1).unwrap());
        assert!(!store.delete_task(day(), 1).unwrap());
        let remaining = store.read_tasks(day()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "b");

        assert!(store.delete_task(day(), 2).unwrap());
        assert!(!store.day_file(day()).unwrap().exists());
    }

    #[test]
    fn set_status_marks_done_with_report() {
        let (_dir, store) = setup();
        store.add_task(day(), task("a", 8), Occurrence::OneOff).unwrap();

        let done = store
            .set_status(day(), 1, TaskStatus::Done, Some("finished".to_string()))
            .unwrap();
        assert_eq!(done.status, TaskStatus::Done);
        assert_eq!(store.read_tasks(day()).unwrap()[0].report, "finished");

        let err = store.set_status(day(), 9, TaskStatus::Done, None).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound { id: 9, .. }));
    }

    #[test]
    fn corrupt_day_file_is_surfaced() {
        let (_dir, store) = setup();
        fs::write(store.day_file(day()).unwrap(), "not json").unwrap();

        assert!(matches!(store.read_tasks(day()), Err(Error::CorruptStore { .. })));
        assert!(matches!(
            store.add_task(day(), task("a", 8), Occurrence::OneOff),
            Err(Error::CorruptStore { .. })
        ));
        assert_eq!(fs::read_to_string(store.day_file(day()).unwrap()).unwrap(), "not json");
    }

    #[test]
    fn list_days_sorted_and_skips_foreign_entries() {
        let (_dir, store) = setup();
        let a = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let c = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        for date in [a, b, c] {
            store.add_task(date, task("t", 8), Occurrence::OneOff).unwrap();
        }
        fs::write(store.tasks_dir().join("notes.txt"), "x").unwrap();
        fs::create_dir(store.tasks_dir().join("01_01_2024.task")).unwrap();

        let days: Vec<_> = store.list_days().unwrap().iter().map(|k| k.date()).collect();
        assert_eq!(days, vec![c, a, b]);
    }

    #[test]
    fn clear_all_removes_days_and_counter() {
        let (_dir, store) = setup();
        store.add_task(day(), task("a", 8), Occurrence::OneOff).unwrap();
        store.allocator().allocate().unwrap();
        assert!(store.counter_file().exists());

        assert_eq!(store.clear_all().unwrap(), 1);
        assert!(store.list_days().unwrap().is_empty());
        assert!(!store.counter_file().exists());
        assert!(store.tasks_dir().exists());
        assert!(!store.locks_dir().exists());

        // The store stays usable afterwards.
        store.add_task(day(), task("b", 9), Occurrence::OneOff).unwrap();
        assert_eq!(store.read_tasks(day()).unwrap().len(), 1);
    }

    #[test]
    fn out_of_range_years_are_refused_without_writing() {
        let (_dir, store) = setup();
        let far = NaiveDate::from_ymd_opt(10000, 1, 5).unwrap();

        let err = store
            .add_task(far, task("series", 8).with_id(150), Occurrence::Series)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(store.read_tasks(far).is_err());
        assert!(store.day_file(far).is_err());
        assert_eq!(fs::read_dir(store.tasks_dir()).unwrap().count(), 0);
        assert!(store.list_days().unwrap().is_empty());
    }

    #[test]
    fn unchanged_day_is_not_rewritten() {
        let (_dir, store) = setup();
        let raw = r#"[{"id":1,"title":"a","description":"","fromTime":"08:00","toTime":"08:30","futureField":true}]"#;
        fs::write(store.day_file(day()).unwrap(), raw).unwrap();

        assert!(!store.delete_task(day(), 150).unwrap());
        assert_eq!(fs::read_to_string(store.day_file(day()).unwrap()).unwrap(), raw);

        assert!(matches!(
            store.set_status(day(), 9, TaskStatus::Done, None),
            Err(Error::TaskNotFound { .. })
        ));
        assert_eq!(fs::read_to_string(store.day_file(day()).unwrap()).unwrap(), raw);
    }

    #[test]
    fn edit_task_applies_under_lock_and_keeps_other_fields() {
        let (_dir, store) = setup();
        store.add_task(day(), task("draft", 8), Occurrence::OneOff).unwrap();
        store
            .set_status(day(), 1, TaskStatus::Done, Some("sent".to_string()))
            .unwrap();

        let edited = store
            .edit_task(day(), 1, |t| {
                t.title = "final".to_string();
                Ok(())
            })
            .unwrap();
        assert_eq!(edited.title, "final");
        assert_eq!(edited.status, TaskStatus::Done);
        assert_eq!(edited.report, "sent");
        assert_eq!(store.read_tasks(day()).unwrap(), vec![edited]);

        let err = store.edit_task(day(), 9, |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound { id: 9, .. }));

        let err = store
            .edit_task(day(), 1, |t| {
                t.title = "discarded".to_string();
                Err(Error::InvalidArgument("rejected".to_string()))
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(store.read_tasks(day()).unwrap()[0].title, "final");
    }

    #[test]
    fn concurrent_edit_and_done_keep_both_changes() {
        let (_dir, store) = setup();
        store.add_task(day(), task("draft", 8), Occurrence::OneOff).unwrap();

        for round in 0..20 {
            let editor = store.clone();
            let finisher = store.clone();
            let title = format!("title-{round}");
            let expected = title.clone();
            let a = std::thread::spawn(move || {
                editor
                    .edit_task(day(), 1, |t| {
                        t.title = title;
                        Ok(())
                    })
                    .unwrap();
            });
            let b = std::thread::spawn(move || {
                finisher
                    .set_status(day(), 1, TaskStatus::Done, Some(format!("r{round}")))
                    .unwrap();
            });
            a.join().unwrap();
            b.join().unwrap();

            let stored = &store.read_tasks(day()).unwrap()[0];
            assert_eq!(stored.title, expected);
            assert_eq!(stored.status, TaskStatus::Done);
            assert_eq!(stored.report, format!("r{round}"));

            store
                .set_status(day(), 1, TaskStatus::Pending, Some(String::new()))
                .unwrap();
        }
    }

    #[test]
    fn concurrent_adds_on_one_day_do_not_lose_updates() {
        let (_dir, store) = setup();
        let threads = 8;
        let barrier = std::sync::Arc::new(std::sync::Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let store = store.clone();
                let barrier = std::sync::Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    store
                        .add_task(day(), task(&format!("t{i}"), 8), Occurrence::OneOff)
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=threads as u32).collect::<Vec<_>>());
        assert_eq!(store.read_tasks(day()).unwrap().len(), threads);
    }
}
