use calends_core::collection::EventCollection;
use calends_core::models::Event;
use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use owo_colors::{OwoColorize, Style};
use std::io::{self, IsTerminal, Write};

const RULE_WIDTH: usize = 80;
const LOCATION_WIDTH: usize = 60;
const TIME_COLUMN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Enabled,
    Disabled,
}

impl ColorMode {
    /// Colors are used only when not disabled and stdout is a terminal.
    pub fn detect(no_color: bool) -> Self {
        if no_color || !io::stdout().is_terminal() {
            ColorMode::Disabled
        } else {
            ColorMode::Enabled
        }
    }
}

/// Styles used by the week view. A disabled palette renders plain text.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub rule: Style,
    pub title: Style,
    pub today: Style,
    pub day: Style,
    pub past_day: Style,
    pub event: Style,
    pub past_event: Style,
    pub location: Style,
    pub muted: Style,
    pub total: Style,
}

impl Palette {
    pub fn new(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Enabled => Self {
                rule: Style::new().bold(),
                title: Style::new().cyan().bold(),
                today: Style::new().green().bold(),
                day: Style::new().white().bold(),
                past_day: Style::new().dimmed().bold(),
                event: Style::new().blue(),
                past_event: Style::new().dimmed(),
                location: Style::new().cyan(),
                muted: Style::new().dimmed(),
                total: Style::new().bold(),
            },
            ColorMode::Disabled => Self::plain(),
        }
    }

    pub fn plain() -> Self {
        Self {
            rule: Style::new(),
            title: Style::new(),
            today: Style::new(),
            day: Style::new(),
            past_day: Style::new(),
            event: Style::new(),
            past_event: Style::new(),
            location: Style::new(),
            muted: Style::new(),
            total: Style::new(),
        }
    }
}

/// Midnight on the Monday of the week containing `date`, in `offset`.
pub fn week_start(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let monday = date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))?;
    offset.from_local_datetime(&monday.and_time(NaiveTime::MIN)).single()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// A seven-day agenda starting at `start`.
pub struct WeekView<'a> {
    events: &'a EventCollection,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    offset: FixedOffset,
    palette: Palette,
}

impl<'a> WeekView<'a> {
    /// Returns `None` when the week would run past the last representable date.
    pub fn new(
        events: &'a EventCollection,
        start: DateTime<FixedOffset>,
        palette: Palette,
    ) -> Option<Self> {
        let end = start.checked_add_signed(Duration::days(7))?;
        Some(Self {
            events,
            offset: *start.offset(),
            start,
            end,
            palette,
        })
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Events starting within the week, in chronological order.
    pub fn week_events(&self) -> Vec<&'a Event> {
        self.events
            .group_by_day(&self.start, &self.end(), self.offset)
            .into_values()
            .flatten()
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.week_events())
    }

    pub fn render<W: Write>(&self, out: &mut W, now: DateTime<FixedOffset>) -> io::Result<()> {
        let p = &self.palette;
        let rule = "=".repeat(RULE_WIDTH);
        let today = now.with_timezone(&self.offset).date_naive();
        let days = self.events.group_by_day(&self.start, &self.end(), self.offset);

        writeln!(out)?;
        writeln!(out, "{}", rule.style(p.rule))?;
        let title = format!(
            "Week {}, {}",
            self.start.iso_week().week(),
            self.start.format("%B %Y")
        );
        writeln!(out, "{}", title.style(p.title))?;
        writeln!(out, "{}", rule.style(p.rule))?;

        let mut current = self.start.date_naive();
        for _ in 0..7 {
            let header = current.format("%A, %b %d").to_string();
            let style = if current == today {
                p.today
            } else if current < today {
                p.past_day
            } else {
                p.day
            };
            writeln!(out)?;
            writeln!(out, "{}", header.style(style))?;
            writeln!(out, "{}", "-".repeat(RULE_WIDTH).style(p.muted))?;

            match days.get(&current) {
                Some(events) => {
                    for event in events {
                        self.render_event(out, event, now)?;
                    }
                }
                None => writeln!(out, "{}", "  No events".style(p.muted))?,
            }

            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }

        let total: usize = days.values().map(Vec::len).sum();
        writeln!(out)?;
        writeln!(out, "{}", rule.style(p.rule))?;
        writeln!(out, "{}", format!("Total events: {}", total).style(p.total))?;
        Ok(())
    }

    fn render_event<W: Write>(&self, out: &mut W, event: &Event, now: DateTime<FixedOffset>) -> io::Result<()> {
        let p = &self.palette;
        let start = event.start.with_timezone(&self.offset).format("%H:%M").to_string();
        let end = event.end.with_timezone(&self.offset).format("%H:%M").to_string();
        let time_range = if start == end {
            "All day".to_string()
        } else {
            format!("{} - {}", start, end)
        };
        let style = if event.end < now { p.past_event } else { p.event };
        let line = format!("  {:<width$}{}", time_range, event.summary, width = TIME_COLUMN);
        writeln!(out, "{}", line.style(style))?;

        if !event.location.is_empty() {
            let location = format!(
                "{}\u{26b2} {}",
                " ".repeat(TIME_COLUMN + 4),
                truncate(&event.location, LOCATION_WIDTH)
            );
            writeln!(out, "{}", location.style(p.location))?;
        }
        Ok(())
    }
}
