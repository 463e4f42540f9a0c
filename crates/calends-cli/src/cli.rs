use clap::Parser;
use std::path::PathBuf;

/// Display iCal calendar events in a weekly terminal view
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  calends calendar.ics                      View a local calendar file
  calends https://example.com/calendar.ics  View a calendar from a URL
  calends -c calends.toml                   Use a config file
  calends -d 2025-12-25                     View a specific week (snaps to Monday)
  calends -t +05:30 calendar.ics            View with a UTC offset")]
pub struct Cli {
    /// iCal calendar sources (.ics files or HTTP(S) URLs)
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Path to a configuration file (JSON, or TOML when ending in .toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Any date within the week to display
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Target timezone: UTC, GMT, LOCAL or an offset such as +05:30
    #[arg(short, long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// Shift the displayed week by N weeks
    #[arg(long, value_name = "N", default_value_t = 0, allow_hyphen_values = true)]
    pub week: i64,

    /// Maximum number of instances generated per recurring event
    #[arg(long, value_name = "N")]
    pub max_instances: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the week's events as JSON instead of the weekly view
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
