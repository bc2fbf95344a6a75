//! Day cells for the month, week and year grids.
//!
//! Highlighting (weekends, holidays, the patron day) is decided here, on top
//! of the membership filter.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::date_range::DateRange;
use crate::error::CalendarResult;
use crate::event::{CalendarEvent, EventType};
use crate::membership::events_on;

/// Days shown for the month of `date`: whole ISO weeks from the one holding
/// the 1st to the one holding the last day.
pub fn month_grid(date: NaiveDate) -> CalendarResult<Vec<NaiveDate>> {
    let month = DateRange::month(date)?;
    let start = DateRange::iso_week(month.start)?.start;
    let end = DateRange::iso_week(month.end)?.end;
    Ok(DateRange { start, end }.days().collect())
}

/// Monday through Sunday of the week holding `date`.
pub fn week_days(date: NaiveDate) -> CalendarResult<Vec<NaiveDate>> {
    Ok(DateRange::iso_week(date)?.days().collect())
}

/// First day of each month of the year holding `date`.
pub fn year_months(date: NaiveDate) -> CalendarResult<Vec<NaiveDate>> {
    let year = DateRange::year(date)?;
    Ok(year.days().filter(|d| d.day() == 1).collect())
}

#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from neighbouring months
    pub in_focus: bool,
    pub events: Vec<&'a CalendarEvent>,
    pub is_today: bool,
    pub is_patron_day: bool,
}

impl<'a> DayCell<'a> {
    pub fn build(
        date: NaiveDate,
        focus: &DateRange,
        events: &'a [CalendarEvent],
        patron_day: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        DayCell {
            date,
            in_focus: focus.contains(date),
            events: events_on(events, date).collect(),
            is_today: date == today,
            is_patron_day: patron_day == Some(date),
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn has_holiday(&self) -> bool {
        self.has_type(EventType::Holiday)
    }

    pub fn has_type(&self, event_type: EventType) -> bool {
        self.events.iter().any(|e| e.event_type == event_type)
    }

    /// Weekend, holiday or patron day
    pub fn is_non_working(&self) -> bool {
        self.is_weekend() || self.has_holiday() || self.is_patron_day
    }

    /// Distinct event types present, in order of first appearance.
    pub fn summary_kinds(&self) -> Vec<EventType> {
        let mut kinds = Vec::new();
        for event in &self.events {
            if !kinds.contains(&event.event_type) {
                kinds.push(event.event_type);
            }
        }
        kinds
    }
}

/// Cells for every day in `days`, focused on `focus`.
pub fn cells<'a>(
    days: &[NaiveDate],
    focus: &DateRange,
    events: &'a [CalendarEvent],
    patron_day: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<DayCell<'a>> {
    days.iter()
        .map(|d| DayCell::build(*d, focus, events, patron_day, today))
        .collect()
}
