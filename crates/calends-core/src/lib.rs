//! # Calends Core Library
//!
//! Turns iCalendar text into a flat list of display-ready, day-bounded
//! event instances.
//!
//! ## Features
//!
//! - **Lenient Parsing**: folded lines, mixed line endings and malformed
//!   properties never abort a document; bad events are dropped, bad rules
//!   fall back to a single instance
//! - **Explicit Offsets**: every event instant carries a fixed UTC offset;
//!   floating times are reinterpreted in the configured target offset
//! - **Bounded Recurrence**: DAILY, WEEKLY, MONTHLY and YEARLY rules with
//!   COUNT, INTERVAL and UNTIL, capped by a configurable instance limit
//! - **Multi-day Splitting**: events crossing midnight become one piece per day
//!
//! ## Core Modules
//!
//! - [`datetime`]: DATE / DATE-TIME parsing and offset resolution
//! - [`parser`]: line unfolding, VEVENT extraction and event parsing
//! - [`recurrence`]: RRULE expansion
//! - [`multiday`]: splitting of events that span several days
//! - [`collection`]: accumulation, filtering and grouping of events
//! - [`models`]: event and recurrence rule types
//! - [`timezone`]: target timezone parsing
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust
//! use calends_core::{
//!     collection::EventCollection, datetime::Normalizer, parser::IcalParser,
//!     timezone::parse_target_timezone,
//! };
//!
//! let content = "BEGIN:VCALENDAR\r\n\
//! BEGIN:VEVENT\r\n\
//! SUMMARY:Daily standup\r\n\
//! DTSTART:20250113T090000\r\n\
//! DTEND:20250113T091500\r\n\
//! RRULE:FREQ=DAILY;COUNT=5\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let target = parse_target_timezone("+01:00").unwrap();
//! let parser = IcalParser::new(Normalizer::new(target), 100);
//!
//! let mut collection = EventCollection::new();
//! collection.add_events(parser.parse(content));
//! collection.expand_multiday();
//!
//! assert_eq!(collection.count(), 5);
//! ```

pub mod collection;
pub mod datetime;
pub mod error;
pub mod models;
pub mod multiday;
pub mod parser;
pub mod recurrence;
pub mod timezone;
