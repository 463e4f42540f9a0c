/// Black-box tests for the calends binary.
///
/// Every test runs in its own temporary working directory so config file
/// discovery and the fetch cache never leak between tests.
use predicates::prelude::*;

mod helpers;
use helpers::{assertions, CliTestHarness, TestFixtures};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("weekly terminal view"))
        .stdout(predicate::str::contains("--timezone"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("calends"));

    harness
        .run_failure(&["--unknown-flag"])
        .stderr(assertions::has_error());
}

#[test]
fn test_weekly_view_from_local_file() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    harness
        .run_success(&["work.ics", "--date", "2025-01-15", "-t", "UTC", "--no-color"])
        .stdout(assertions::has_week_view())
        .stdout(assertions::is_plain())
        .stdout(predicate::str::contains("Week 3, January 2025"))
        .stdout(predicate::str::contains("Wednesday, Jan 15"))
        .stdout(predicate::str::contains("14:00 - 15:00  Team Meeting"))
        .stdout(predicate::str::contains("Conference Room A"))
        .stdout(predicate::str::contains("09:15 - 09:30  Standup"))
        .stdout(predicate::str::contains("All day        Company Holiday"))
        .stdout(predicate::str::contains("Total events: 7"));
}

#[test]
fn test_date_snaps_to_monday() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    harness
        .run_success(&["work.ics", "-d", "2025-01-19", "-t", "UTC"])
        .stdout(predicate::str::contains("Monday, Jan 13"))
        .stdout(predicate::str::contains("Total events: 7"));
}

#[test]
fn test_week_offset() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    harness
        .run_success(&["work.ics", "-d", "2025-01-15", "-t", "UTC", "--week", "1"])
        .stdout(predicate::str::contains("Week 4, January 2025"))
        .stdout(predicate::str::contains("Total events: 0"));

    harness
        .run_success(&["work.ics", "-d", "2025-01-15", "-t", "UTC", "--week", "-1"])
        .stdout(predicate::str::contains("Monday, Jan 06"));
}

#[test]
fn test_target_timezone_shifts_times() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    harness
        .run_success(&["work.ics", "-d", "2025-01-15", "--timezone", "+05:30"])
        .stdout(predicate::str::contains("19:30 - 20:30  Team Meeting"));
}

#[test]
fn test_invalid_timezone_warns_and_continues() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    harness
        .run_success(&["work.ics", "-d", "2025-01-15", "-t", "Mars/Olympus"])
        .stderr(predicate::str::contains("Invalid timezone"))
        .stdout(predicate::str::contains("14:00 - 15:00  Team Meeting"));
}

#[test]
fn test_json_output() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    let output = harness
        .command()
        .args(["work.ics", "-d", "2025-01-15", "-t", "UTC", "--json"])
        .output()
        .expect("Failed to run calends");
    assert!(output.status.success());

    let events: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    let events = events.as_array().expect("expected a JSON array");
    assert_eq!(events.len(), 7);
    assert_eq!(events[0]["summary"], "Standup");
    assert_eq!(events[0]["start"], "2025-01-13T09:15:00+00:00");
    assert!(events.iter().all(|e| e.get("rrule").is_none()));
}

#[test]
fn test_max_instances_flag() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    harness
        .run_success(&["work.ics", "-d", "2025-01-15", "-t", "UTC", "--max-instances", "2"])
        .stdout(predicate::str::contains("Total events: 4"));
}

#[test]
fn test_multiple_sources_and_failures() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());
    harness.write_file("personal.ics", TestFixtures::personal_calendar());
    harness.write_file("notes.txt", "not a calendar");

    harness
        .run_success(&[
            "work.ics",
            "missing.ics",
            "notes.txt",
            "personal.ics",
            "-d",
            "2025-01-15",
            "-t",
            "UTC",
        ])
        .stderr(predicate::str::contains("Error reading missing.ics"))
        .stderr(predicate::str::contains("Error reading notes.txt"))
        .stdout(predicate::str::contains("Dentist"))
        .stdout(predicate::str::contains("Total events: 8"));
}

#[test]
fn test_default_config_with_aliases() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());
    harness.write_file("personal.ics", TestFixtures::personal_calendar());
    harness.write_file(
        "calendars.json",
        r#"{"calendars": {"Work": "work.ics", "Home": "personal.ics", "Broken": "gone.ics"}, "timezone": "UTC"}"#,
    );

    harness
        .run_success(&["-d", "2025-01-15"])
        .stderr(predicate::str::contains("Error reading Broken"))
        .stdout(predicate::str::contains("Total events: 8"));
}

#[test]
fn test_explicit_toml_config() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());
    let config = harness.write_file(
        "settings.toml",
        "calendars = [\"work.ics\"]\ntimezone = \"UTC\"\nmax_recurring_instances = 1\n",
    );

    harness
        .run_success(&["-c", config.to_str().unwrap(), "-d", "2025-01-15"])
        .stdout(predicate::str::contains("Total events: 3"));
}

#[test]
fn test_cli_sources_combine_with_config() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());
    harness.write_file("personal.ics", TestFixtures::personal_calendar());
    let config = harness.write_file("calends.json", r#"{"calendars": ["work.ics"]}"#);

    harness
        .run_success(&["personal.ics", "-c", config.to_str().unwrap(), "-d", "2025-01-15", "-t", "UTC"])
        .stdout(predicate::str::contains("Dentist"))
        .stdout(predicate::str::contains("Team Meeting"));
}

#[test]
fn test_fatal_errors() {
    let harness = CliTestHarness::new();
    harness.write_file("empty.ics", TestFixtures::empty_calendar());
    harness.write_file("work.ics", TestFixtures::sample_calendar());
    let bad_config = harness.write_file("bad.json", r#"{"calendars": []}"#);

    harness
        .run_failure(&[])
        .code(1)
        .stderr(predicate::str::contains("No calendar sources provided"));

    harness
        .run_failure(&["work.ics", "--date", "15/01/2025"])
        .code(1)
        .stderr(predicate::str::contains("Invalid date"));

    harness
        .run_failure(&["empty.ics"])
        .code(1)
        .stderr(predicate::str::contains("No events found"));

    harness
        .run_failure(&["-c", bad_config.to_str().unwrap()])
        .code(1)
        .stderr(predicate::str::contains("calendars"));

    harness
        .run_failure(&["-c", "nowhere.json"])
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_output_is_plain_when_piped() {
    let harness = CliTestHarness::new();
    harness.write_file("work.ics", TestFixtures::sample_calendar());

    harness
        .run_success(&["work.ics", "-d", "2025-01-15"])
        .stdout(assertions::is_plain());
}

#[test]
fn test_url_cache_is_used() {
    let harness = CliTestHarness::new();
    let url = "https://calendar.invalid/work.ics";
    let now = chrono::Utc::now().timestamp();
    let cache = serde_json::json!({
        url: { "timestamp": now, "content": TestFixtures::sample_calendar() }
    });
    harness.write_file("cache.json", &cache.to_string());

    harness
        .run_success(&[url, "-d", "2025-01-15", "-t", "UTC"])
        .stdout(predicate::str::contains("Team Meeting"));
    assert!(harness.dir().join("cache.json").exists());
}
