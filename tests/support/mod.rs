#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::NaiveDate;
use taskday::config::Config;
use taskday::store::TaskStore;
use taskday::task::Task;
use tempfile::TempDir;

/// A throwaway data root for one test
pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> TaskStore {
        TaskStore::open(self.dir.path(), &Config::default()).expect("open store")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join("taskday.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn day_file(&self, date: &str) -> PathBuf {
        self.store()
            .day_file(date.parse().expect("date"))
            .expect("day file")
    }

    pub fn read_day(&self, date: &str) -> Vec<Task> {
        let date: NaiveDate = date.parse().expect("date");
        self.store().read_tasks(date).expect("read day")
    }

    /// `taskday` command pointed at this root
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskday").expect("binary");
        cmd.env_remove("RUST_LOG");
        cmd.env("TASKDAY_ROOT", self.dir.path());
        cmd
    }

    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .output()
            .expect("run taskday");
        serde_json::from_slice(&output.stdout).expect("json output")
    }
}
