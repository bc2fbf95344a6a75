//! Day-before reminders.
//!
//! Each reminder is delivered at most once per calendar day; delivered keys
//! are remembered in `LocalState`.

use chrono::NaiveDate;

use crate::event::CalendarEvent;
use crate::local_state::LocalState;

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder<'a> {
    pub event: &'a CalendarEvent,
    pub key: String,
}

impl Reminder<'_> {
    pub fn body(&self) -> String {
        let time = self.event.time.as_deref().unwrap_or("Todo el día");
        format!("Mañana: {} ({})", self.event.title, time)
    }
}

/// Events starting the day after `today`.
pub fn events_tomorrow(events: &[CalendarEvent], today: NaiveDate) -> Vec<&CalendarEvent> {
    let Some(tomorrow) = today.succ_opt() else {
        return Vec::new();
    };
    events.iter().filter(|e| e.start == tomorrow).collect()
}

pub fn notified_key(event: &CalendarEvent, today: NaiveDate) -> String {
    format!("notified_{}_{}", event.id, today.format("%Y%m%d"))
}

/// Reminders for tomorrow that have not been delivered today.
pub fn pending<'a>(
    events: &'a [CalendarEvent],
    today: NaiveDate,
    state: &LocalState,
) -> Vec<Reminder<'a>> {
    events_tomorrow(events, today)
        .into_iter()
        .map(|event| Reminder {
            event,
            key: notified_key(event, today),
        })
        .filter(|r| !state.notified.contains(&r.key))
        .collect()
}

/// Record delivered reminders, forgetting keys from earlier days.
pub fn mark_sent(state: &mut LocalState, sent: &[Reminder], today: NaiveDate) {
    let stamp = format!("_{}", today.format("%Y%m%d"));
    state.notified.retain(|key| key.ends_with(&stamp));
    state.notified.extend(sent.iter().map(|r| r.key.clone()));
}
