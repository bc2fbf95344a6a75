//! The seeded 2026 school year.
//!
//! Shipped as a snapshot-format JSON document so it goes through the same
//! decoder as stored data.

use crate::event::CalendarEvent;

const FIXTURES_2026: &str = include_str!("../data/fixtures_2026.json");

const DEFAULT_TIME: &str = "06:30";
const DEFAULT_LOCATION: &str = "Sede Administrativa";
const DEFAULT_PARTICIPANTS: &str = "Comunidad Educativa";
const DEFAULT_OBSERVATIONS: &str = "Sin observaciones adicionales";

/// Seed events with the agenda defaults filled in.
pub fn seed_events() -> Vec<CalendarEvent> {
    match serde_json::from_str::<Vec<CalendarEvent>>(FIXTURES_2026) {
        Ok(events) => events.into_iter().map(with_agenda_defaults).collect(),
        Err(e) => {
            tracing::error!(error = %e, "embedded fixture list is not valid; starting empty");
            Vec::new()
        }
    }
}

fn with_agenda_defaults(mut event: CalendarEvent) -> CalendarEvent {
    event.time.get_or_insert_with(|| DEFAULT_TIME.to_string());
    event.location.get_or_insert_with(|| DEFAULT_LOCATION.to_string());
    event.participants.get_or_insert_with(|| DEFAULT_PARTICIPANTS.to_string());
    if event.observations.is_none() {
        event.observations = Some(
            event
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_OBSERVATIONS.to_string()),
        );
    }
    event
}
