//! iCalendar export of the whole calendar.

use chrono::{Days, NaiveDate};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::{CalendarError, CalendarResult};
use crate::event::CalendarEvent;

/// Generate one VCALENDAR holding an all-day VEVENT per event.
pub fn generate_ics(events: &[CalendarEvent], calendar_name: &str) -> CalendarResult<String> {
    let mut cal = Calendar::new();
    cal.name(calendar_name);

    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@schoolcal", event.id));
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTAMP", &dtstamp);

        // DTEND is exclusive for VALUE=DATE
        let end = event.end.checked_add_days(Days::new(1)).ok_or_else(|| {
            CalendarError::Export(format!("end date out of range for '{}'", event.id))
        })?;
        add_date_property(&mut ics_event, "DTSTART", event.start);
        add_date_property(&mut ics_event, "DTEND", end);

        if let Some(ref loc) = event.location {
            ics_event.location(loc);
        }

        if let Some(notes) = event.notes() {
            ics_event.description(notes);
        }

        ics_event.add_property("CATEGORIES", event.event_type.label());

        if let Some(ref participants) = event.participants {
            ics_event.add_property("COMMENT", participants);
        }

        if let Some(ref time) = event.time {
            ics_event.add_property("X-SCHOOLCAL-TIME", time);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Replace the crate's PRODID and drop the default CALSCALE.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:SCHOOLCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
