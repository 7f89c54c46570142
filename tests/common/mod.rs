#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use coupon_calendar::{
    cli::{ui::navigation::NavKey, ui::test_mode::ScriptedSurface, ShellContext},
    clock::FixedClock,
    config::Config,
    storage::JsonBondStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that outlives the calling test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Context over a scripted surface, a JSON store and a clock pinned to `today`.
pub fn scripted_context(keys: Vec<NavKey>, lines: &[&str], today: NaiveDate) -> ShellContext {
    let surface = ScriptedSurface::new(keys).with_lines(lines.iter().copied());
    ShellContext::new(
        Box::new(surface),
        Box::new(JsonBondStore),
        Box::new(FixedClock(today)),
        Config::default(),
    )
    .expect("build shell context")
}

pub fn console_lines(context: &ShellContext) -> Vec<String> {
    context.console.lines().map(str::to_string).collect()
}
