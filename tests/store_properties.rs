mod support;

use chrono::{NaiveDate, NaiveTime, Weekday};
use taskday::range_delete::delete_with_future_tasks;
use taskday::recurrence::{add_repeated_tasks, WeekdaySet};
use taskday::store::Occurrence;
use taskday::task::{Task, ONE_OFF_POOL_MAX};
use taskday::Error;

use support::TestRoot;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(title: &str) -> Task {
    Task::new(
        title,
        "",
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
    )
}

#[test]
fn next_one_off_id_follows_a_full_prefix() {
    let root = TestRoot::new();
    let store = root.store();
    let date = ymd(2024, 9, 2);
    let prefix: Vec<Task> = (1..=40).map(|id| task("t").with_id(id)).collect();
    store.write_tasks(date, prefix).unwrap();

    let stored = store.add_task(date, task("next"), Occurrence::OneOff).unwrap();
    assert_eq!(stored.id, 41);
}

#[test]
fn pool_is_a_hard_per_day_limit() {
    let root = TestRoot::new();
    let store = root.store();
    let date = ymd(2024, 9, 2);
    for _ in 0..ONE_OFF_POOL_MAX {
        store.add_task(date, task("t"), Occurrence::OneOff).unwrap();
    }

    let err = store.add_task(date, task("one too many"), Occurrence::OneOff).unwrap_err();
    assert!(matches!(err, Error::PoolExhausted(_)));
    assert_eq!(err.exit_code(), 3);

    // A different day still has the whole pool.
    let other = store
        .add_task(ymd(2024, 9, 3), task("fresh"), Occurrence::OneOff)
        .unwrap();
    assert_eq!(other.id, 1);
}

#[test]
fn series_then_range_delete_round_trip() {
    let root = TestRoot::new();
    let store = root.store();
    let allocator = store.allocator();
    allocator.set_current(150).unwrap();

    let weekdays: WeekdaySet = [Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect();
    // 2024-09-02 is a Monday.
    let series = add_repeated_tasks(
        &store,
        &allocator,
        ymd(2024, 9, 2),
        ymd(2024, 9, 6),
        weekdays,
        &task("Run"),
    )
    .unwrap();
    assert_eq!(series.id, 150);
    assert_eq!(series.dates, vec![ymd(2024, 9, 2), ymd(2024, 9, 4), ymd(2024, 9, 6)]);
    assert_eq!(allocator.current().unwrap(), 151);

    let outcome = delete_with_future_tasks(&store, ymd(2024, 9, 4), &task("Run").with_id(150)).unwrap();
    assert_eq!(outcome.removed_from, vec![ymd(2024, 9, 4), ymd(2024, 9, 6)]);

    let days: Vec<NaiveDate> = store.list_days().unwrap().iter().map(|k| k.date()).collect();
    assert_eq!(days, vec![ymd(2024, 9, 2)]);
}

#[test]
fn day_files_written_by_the_app_load_unchanged() {
    let root = TestRoot::new();
    let store = root.store();
    let raw = r#"[
    {
        "id": 121,
        "title": "Gym",
        "description": "legs",
        "fromTime": "18:00",
        "toTime": "19:30",
        "status": "DONE",
        "report": "done early",
        "attachments": ["content://media/external/images/media/31"]
    },
    {
        "id": 2,
        "title": "Groceries",
        "description": "",
        "fromTime": "20:15:30.5",
        "toTime": "20:45"
    }
]"#;
    std::fs::write(root.day_file("2024-10-12"), raw).unwrap();

    let tasks = store.read_tasks(ymd(2024, 10, 12)).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].attachments.len(), 1);
    assert_eq!(
        tasks[1].from_time,
        NaiveTime::from_hms_milli_opt(20, 15, 30, 500).unwrap()
    );

    // Rewriting keeps every field, including sub-second precision.
    store.write_tasks(ymd(2024, 10, 12), tasks.clone()).unwrap();
    assert_eq!(store.read_tasks(ymd(2024, 10, 12)).unwrap(), tasks);
}
