#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness running the CLI inside a temporary working directory
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    /// Create a new test harness with an empty working directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("calends").expect("Failed to find calends binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env("CALENDS_CACHE_PATH", self.temp_dir.path().join("cache.json"));
        cmd.env_remove("CALENDS_LOG");
        cmd.env_remove("CALENDS_TIMEZONE");
        cmd
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file into the working directory and return its absolute path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// A week of events around Wednesday 2025-01-15
    pub fn sample_calendar() -> &'static str {
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//calends//tests//EN\r\n\
BEGIN:VEVENT\r\n\
UID:meeting@example.com\r\n\
SUMMARY:Team Meeting\r\n\
DTSTART:20250115T140000Z\r\n\
DTEND:20250115T150000Z\r\n\
LOCATION:Conference Room A\r\n\
DESCRIPTION:Weekly team sync\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:standup@example.com\r\n\
SUMMARY:Standup\r\n\
DTSTART:20250113T091500Z\r\n\
DTEND:20250113T093000Z\r\n\
RRULE:FREQ=DAILY;COUNT=5\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:holiday@example.com\r\n\
SUMMARY:Company Holiday\r\n\
DTSTART;VALUE=DATE:20250117\r\n\
DTEND;VALUE=DATE:20250118\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    }

    /// A second calendar with a single event on Tuesday 2025-01-14
    pub fn personal_calendar() -> &'static str {
        "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Dentist\r\n\
DTSTART:20250114T080000Z\r\n\
DTEND:20250114T090000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    }

    /// A calendar without any VEVENT
    pub fn empty_calendar() -> &'static str {
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n"
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output contains the weekly view frame
    pub fn has_week_view() -> impl Predicate<str> {
        predicate::str::contains("Week ")
            .and(predicate::str::contains("Monday"))
            .and(predicate::str::contains("Sunday"))
            .and(predicate::str::contains("Total events:"))
    }

    /// Predicate to check that output carries no ANSI escapes
    pub fn is_plain() -> impl Predicate<str> {
        predicate::str::contains("\u{1b}[").not()
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
