use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use crate::models::Event;

/// Splits every event that crosses local midnight into day-bounded pieces.
///
/// Single-day events pass through untouched. For a span covering dates
/// `d0..=dn` (n >= 1), one piece is emitted per date in `d0..dn`:
///
/// - `d0`: original start to the next midnight
/// - `dn - 1` (when it is not `d0`): midnight to the original end
/// - anything in between: midnight to midnight
///
/// The end date never gets a piece of its own. For a two-day span this
/// means only the first piece is produced and the original end time is not
/// represented anywhere in the output.
///
/// Midnight boundaries are placed in the offset of the event's start. Events
/// whose end date precedes their start date produce no pieces.
pub fn expand_multiday(events: Vec<Event>) -> Vec<Event> {
    let mut expanded = Vec::with_capacity(events.len());
    for event in events {
        split_into(&mut expanded, event);
    }
    expanded
}

fn split_into(out: &mut Vec<Event>, event: Event) {
    if !event.spans_multiple_days() {
        out.push(event);
        return;
    }

    let start_date = event.start.date_naive();
    let end_date = event.end.date_naive();
    let offset = *event.start.offset();
    let last_date = end_date.pred_opt().unwrap_or(end_date);
    let mut current = start_date;
    while current < end_date {
        let Some(next) = current.checked_add_days(Days::new(1)) else {
            break;
        };
        let piece = if current == start_date {
            midnight(offset, next).map(|end| event.instance(event.start, end))
        } else if current == last_date {
            midnight(offset, current).map(|start| event.instance(start, event.end))
        } else {
            midnight(offset, current)
                .zip(midnight(offset, next))
                .map(|(start, end)| event.instance(start, end))
        };
        match piece {
            Some(piece) => out.push(piece),
            None => break,
        }
        current = next;
    }
}

fn midnight(offset: FixedOffset, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
}
