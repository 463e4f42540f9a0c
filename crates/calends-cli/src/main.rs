use anyhow::{anyhow, Context, Result};
use calends_core::datetime::Normalizer;
use calends_core::error::CoreError;
use calends_core::parser::IcalParser;
use calends_core::timezone::{format_offset, parse_target_timezone_lenient};
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use std::io::Write;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cache;
mod cli;
mod config;
mod fetcher;
mod manager;
mod views;

use cache::Cache;
use config::{CalendarSource, Config};
use fetcher::Fetcher;
use manager::CalendarManager;
use views::week::{week_start, ColorMode, Palette, WeekView};

const LOG_ENV: &str = "CALENDS_LOG";

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        handle_error(e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn run(cli: cli::Cli) -> Result<()> {
    let date = cli
        .date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                CoreError::InvalidInput(format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
            })
        })
        .transpose()?;

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let config_path =
        config::resolve_config_path(cli.config.as_deref(), &cwd, !cli.sources.is_empty())?;
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    let config = Config::load(config_path.as_deref())?;

    let mut sources = config.sources();
    sources.extend(cli.sources.iter().map(CalendarSource::new));
    if sources.is_empty() {
        return Err(anyhow!("No calendar sources provided."));
    }

    let target = cli
        .timezone
        .as_deref()
        .or(config.timezone.as_deref())
        .and_then(parse_target_timezone_lenient);
    let normalizer = Normalizer::new(target);
    let offset = normalizer.effective_offset();
    tracing::info!("Using timezone offset {}", format_offset(offset));

    let max_instances = cli.max_instances.unwrap_or_else(|| config.max_instances());
    let parser = IcalParser::new(normalizer, max_instances);
    let cache = Cache::load(&config.cache_path, config.cache_expiration_secs());
    let fetcher = Fetcher::new(cache).context("Failed to initialize HTTP client")?;

    let mut manager = CalendarManager::new(parser, fetcher);
    for failure in manager.load_sources(&sources).await {
        eprintln!("Error reading {}: {}", failure.source, failure.error);
    }
    if manager.count_events() == 0 {
        return Err(anyhow!("No events found."));
    }

    let now = Utc::now().with_timezone(&offset);
    let start = week_start(date.unwrap_or_else(|| now.date_naive()), offset)
        .and_then(|monday| monday.checked_add_signed(Duration::try_weeks(cli.week)?))
        .ok_or_else(|| CoreError::InvalidInput(format!("Week offset {} is out of range", cli.week)))?;

    let palette = Palette::new(ColorMode::detect(cli.no_color));
    let view = WeekView::new(manager.events(), start, palette)
        .ok_or_else(|| CoreError::InvalidInput(format!("Week offset {} is out of range", cli.week)))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        writeln!(out, "{}", view.to_json()?)?;
    } else {
        view.render(&mut out, now)?;
    }
    out.flush()?;
    Ok(())
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();
    let core_error = err.chain().find_map(|e| e.downcast_ref::<CoreError>());

    match core_error {
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(CoreError::InvalidTimezone(s)) => {
            eprintln!("{} Invalid timezone: {}", "Error:".style(error_style), s.yellow());
        }
        None => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
