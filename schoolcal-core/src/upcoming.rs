//! Upcoming-event ranking.
//!
//! Unlike the grid membership check this is time-aware: an event's instant is
//! its start date combined with its `time` field, so an 06:00 event is already
//! past at 07:00 the same morning even though the day cell still shows it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::event::CalendarEvent;

/// Featured event plus the ones right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Upcoming<'a> {
    pub featured: Option<&'a CalendarEvent>,
    pub lookahead: Vec<&'a CalendarEvent>,
}

impl Upcoming<'_> {
    pub fn is_empty(&self) -> bool {
        self.featured.is_none()
    }
}

/// Rank events strictly after `now`, soonest first.
///
/// Events sharing an instant keep collection order.
pub fn rank(events: &[CalendarEvent], now: NaiveDateTime, lookahead: usize) -> Upcoming<'_> {
    let mut future: Vec<(NaiveDateTime, &CalendarEvent)> = events
        .iter()
        .map(|e| (comparison_instant(e), e))
        .filter(|(instant, _)| *instant > now)
        .collect();
    future.sort_by_key(|(instant, _)| *instant);

    let mut ranked = future.into_iter().map(|(_, e)| e);
    let featured = ranked.next();
    let lookahead = ranked.take(lookahead).collect();

    Upcoming { featured, lookahead }
}

/// Start date combined with the event's time of day (midnight if unknown).
pub fn comparison_instant(event: &CalendarEvent) -> NaiveDateTime {
    let time = match event.time.as_deref() {
        Some(raw) => parse_time(raw).unwrap_or_else(|| {
            tracing::debug!(event = %event.id, time = raw, "unparsable event time, using midnight");
            NaiveTime::MIN
        }),
        None => NaiveTime::MIN,
    };
    event.start.and_time(time)
}

/// Parse the free-text time field: `06:45`, `7:00`, `08:00 AM`, `2:30pm`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let normalized = raw.trim().to_uppercase().replace('.', "");

    let (clock, meridiem) = if let Some(clock) = normalized.strip_suffix("AM") {
        (clock.trim(), Some(false))
    } else if let Some(clock) = normalized.strip_suffix("PM") {
        (clock.trim(), Some(true))
    } else {
        (normalized.as_str(), None)
    };

    let (hour, minute) = clock.split_once(':')?;
    let mut hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;

    match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            hour %= 12;
            if is_pm {
                hour += 12;
            }
        }
        None if hour > 23 => return None,
        None => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Days from `today` until the event starts (0 = today).
pub fn days_until(event: &CalendarEvent, today: NaiveDate) -> i64 {
    (event.start - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventFields, EventType};
    use crate::membership::events_on;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn timed(id: &str, day: NaiveDate, time: Option<&str>) -> CalendarEvent {
        let mut fields = EventFields::new(id, day, day, EventType::Academic);
        fields.time = time.map(str::to_string);
        fields.into_event(id.to_string()).unwrap()
    }

    #[test]
    fn later_same_day_event_is_featured_and_earlier_one_dropped() {
        let events = vec![
            timed("eight", date(2026, 1, 10), Some("08:00")),
            timed("six", date(2026, 1, 10), Some("06:00")),
        ];

        let upcoming = rank(&events, at(2026, 1, 10, 7, 0), 7);
        assert_eq!(upcoming.featured.map(|e| e.id.as_str()), Some("eight"));
        assert!(upcoming.lookahead.is_empty());
    }

    #[test]
    fn lookahead_holds_the_next_n_after_featured() {
        let events: Vec<_> = (1..=10)
            .rev()
            .map(|d| timed(&format!("d{d}"), date(2026, 3, d), None))
            .collect();

        let upcoming = rank(&events, at(2026, 2, 1, 0, 0), 7);
        assert_eq!(upcoming.featured.map(|e| e.id.as_str()), Some("d1"));
        let ids: Vec<_> = upcoming.lookahead.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["d2", "d3", "d4", "d5", "d6", "d7", "d8"]);
    }

    #[test]
    fn nothing_in_the_future_means_no_featured_event() {
        let events = vec![timed("past", date(2025, 12, 1), Some("10:00"))];
        let upcoming = rank(&events, at(2026, 1, 1, 0, 0), 7);
        assert!(upcoming.is_empty());
        assert!(upcoming.lookahead.is_empty());
    }

    #[test]
    fn untimed_event_counts_from_midnight() {
        let events = vec![timed("allday", date(2026, 1, 10), None)];

        // Midnight itself is not strictly after now
        assert!(rank(&events, at(2026, 1, 10, 0, 0), 7).is_empty());
        assert!(!rank(&events, at(2026, 1, 9, 23, 59), 7).is_empty());
    }

    #[test]
    fn same_instant_keeps_collection_order() {
        let events = vec![
            timed("first", date(2026, 1, 26), Some("06:45")),
            timed("second", date(2026, 1, 26), Some("6:45 am")),
        ];
        let upcoming = rank(&events, at(2026, 1, 1, 0, 0), 7);
        assert_eq!(upcoming.featured.map(|e| e.id.as_str()), Some("first"));
        assert_eq!(upcoming.lookahead[0].id, "second");
    }

    #[test]
    fn time_formats() {
        assert_eq!(parse_time("06:45"), NaiveTime::from_hms_opt(6, 45, 0));
        assert_eq!(parse_time("08:00 AM"), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(parse_time("2:30pm"), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time("12:15 a.m."), NaiveTime::from_hms_opt(0, 15, 0));
        assert_eq!(parse_time("12:00 PM"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("todo el día"), None);
    }

    // The grid ignores time of day while the ranking does not. Both answers
    // are kept as-is until the product decides which notion of "now" wins.
    #[test]
    fn grid_and_ranking_disagree_about_an_event_earlier_today() {
        let events = vec![timed("assembly", date(2026, 1, 26), Some("06:45"))];
        let now = at(2026, 1, 26, 9, 0);

        assert_eq!(events_on(&events, now.date()).count(), 1);
        assert!(rank(&events, now, 7).is_empty());
    }
}
