//! Calendar event types.
//!
//! A school calendar only deals in whole days: `start` and `end` are plain
//! calendar dates, so every membership check works on day granularity. The
//! optional `time` is free text from the admin form and only matters for the
//! upcoming-event ranking.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{CalendarError, CalendarResult};

/// Category of an event. Drives labels and colours only.
///
/// The Spanish names written by the earlier web calendar are accepted on
/// load so existing snapshots keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[serde(alias = "academico")]
    Academic,
    #[serde(alias = "institucional")]
    Institutional,
    #[serde(alias = "vacaciones")]
    Vacation,
    #[serde(alias = "festivo")]
    Holiday,
    #[serde(alias = "significativo")]
    Significant,
    #[serde(alias = "efemeride")]
    Ephemeris,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Academic,
        EventType::Institutional,
        EventType::Vacation,
        EventType::Holiday,
        EventType::Significant,
        EventType::Ephemeris,
    ];

    /// Serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Academic => "academic",
            EventType::Institutional => "institutional",
            EventType::Vacation => "vacation",
            EventType::Holiday => "holiday",
            EventType::Significant => "significant",
            EventType::Ephemeris => "ephemeris",
        }
    }

    /// Human-readable name for legends and ICS categories
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Academic => "Academic",
            EventType::Institutional => "Institutional (SDI)",
            EventType::Vacation => "Vacation",
            EventType::Holiday => "Holiday",
            EventType::Significant => "Significant",
            EventType::Ephemeris => "Ephemeris",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "academic" | "academico" => Ok(EventType::Academic),
            "institutional" | "institucional" | "sdi" => Ok(EventType::Institutional),
            "vacation" | "vacaciones" => Ok(EventType::Vacation),
            "holiday" | "festivo" => Ok(EventType::Holiday),
            "significant" | "significativo" => Ok(EventType::Significant),
            "ephemeris" | "efemeride" => Ok(EventType::Ephemeris),
            other => Err(CalendarError::Validation(format!(
                "unknown event type '{}' (expected one of: {})",
                other,
                EventType::ALL.map(|t| t.as_str()).join(", ")
            ))),
        }
    }
}

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(with = "calendar_date")]
    pub start: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Weekday name of `start`, derived on every read so it can never go stale.
    pub fn day(&self) -> &'static str {
        weekday_name(self.start.weekday())
    }

    /// Inclusive date span covered by this event
    pub fn span(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end.max(self.start),
        }
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Observations, falling back to the short description
    pub fn notes(&self) -> Option<&str> {
        self.observations
            .as_deref()
            .or(self.description.as_deref())
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Upper-case Spanish weekday name, as printed in the institutional agenda.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "LUNES",
        Weekday::Tue => "MARTES",
        Weekday::Wed => "MIÉRCOLES",
        Weekday::Thu => "JUEVES",
        Weekday::Fri => "VIERNES",
        Weekday::Sat => "SÁBADO",
        Weekday::Sun => "DOMINGO",
    }
}

/// Fields submitted through the admin form for create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub event_type: EventType,
    pub time: Option<String>,
    pub location: Option<String>,
    pub participants: Option<String>,
    pub observations: Option<String>,
    pub description: Option<String>,
}

impl EventFields {
    pub fn new(
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        event_type: EventType,
    ) -> Self {
        EventFields {
            title: title.into(),
            start,
            end,
            event_type,
            time: None,
            location: None,
            participants: None,
            observations: None,
            description: None,
        }
    }

    /// Prefill the form from an existing event (edit flow)
    pub fn from_event(event: &CalendarEvent) -> Self {
        EventFields {
            title: event.title.clone(),
            start: event.start,
            end: event.end,
            event_type: event.event_type,
            time: event.time.clone(),
            location: event.location.clone(),
            participants: event.participants.clone(),
            observations: event.observations.clone(),
            description: event.description.clone(),
        }
    }

    pub fn validate(&self) -> CalendarResult<()> {
        if self.title.trim().is_empty() {
            return Err(CalendarError::Validation("title must not be empty".into()));
        }

        if self.end < self.start {
            return Err(CalendarError::Validation(format!(
                "end date {} is before start date {}",
                self.end, self.start
            )));
        }

        Ok(())
    }

    /// Build the stored event under `id`.
    ///
    /// Blank optional fields become `None`; observations stand in for a
    /// missing description.
    pub fn into_event(self, id: String) -> CalendarResult<CalendarEvent> {
        self.validate()?;

        let observations = non_blank(self.observations);
        let description = non_blank(self.description).or_else(|| observations.clone());

        Ok(CalendarEvent {
            id,
            title: self.title.trim().to_string(),
            start: self.start,
            end: self.end,
            event_type: self.event_type,
            time: non_blank(self.time),
            location: non_blank(self.location),
            participants: non_blank(self.participants),
            observations,
            description,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Serde adapter for event dates.
///
/// Writes `YYYY-MM-DD`. Reads that, or a full timestamp as stored by a
/// browser (`2026-01-12T05:00:00.000Z`), reduced to the local calendar date.
pub mod calendar_date {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid calendar date '{}'", raw)))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(date);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local).date_naive());
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }
}
