//! Which events belong to a day or a viewport.
//!
//! Both checks work on whole days. The range check is the union of three
//! cases (start inside, end inside, event spans the whole range) so an event
//! that starts before a viewport and ends after it is still shown.

use chrono::NaiveDate;

use crate::date_range::DateRange;
use crate::event::CalendarEvent;

/// True when `day` lies within the event's inclusive span.
pub fn occurs_on(event: &CalendarEvent, day: NaiveDate) -> bool {
    event.start <= day && day <= event.end
}

/// True when the event should be listed for `range`.
pub fn overlaps(event: &CalendarEvent, range: &DateRange) -> bool {
    range.contains(event.start)
        || range.contains(event.end)
        || (event.start < range.start && event.end > range.end)
}

/// Events shown in the cell for `day`, in collection order.
pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
    events.iter().filter(move |e| occurs_on(e, day))
}

/// Events overlapping `range`, sorted by start date.
///
/// The sort is stable, so events sharing a start date keep collection order.
pub fn events_in_range<'a>(
    events: &'a [CalendarEvent],
    range: &DateRange,
) -> Vec<&'a CalendarEvent> {
    let mut matching: Vec<&CalendarEvent> = events.iter().filter(|e| overlaps(e, range)).collect();
    matching.sort_by_key(|e| e.start);
    matching
}

/// The whole collection in agenda order.
pub fn sorted_by_start(events: &[CalendarEvent]) -> Vec<&CalendarEvent> {
    let mut all: Vec<&CalendarEvent> = events.iter().collect();
    all.sort_by_key(|e| e.start);
    all
}
