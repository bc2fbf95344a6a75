//! Date ranges and the viewports built from them.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> CalendarResult<Self> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// Parse an ad-hoc search range from two YYYY-MM-DD strings.
    pub fn from_args(from: &str, to: &str) -> CalendarResult<Self> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }

    pub fn day(date: NaiveDate) -> Self {
        DateRange { start: date, end: date }
    }

    /// ISO week containing `date`: Monday through Sunday.
    pub fn iso_week(date: NaiveDate) -> CalendarResult<Self> {
        let back = Days::new(date.weekday().num_days_from_monday() as u64);
        let start = date.checked_sub_days(back).ok_or_else(|| out_of_range(date))?;
        let end = start
            .checked_add_days(Days::new(6))
            .ok_or_else(|| out_of_range(date))?;
        Ok(DateRange { start, end })
    }

    pub fn month(date: NaiveDate) -> CalendarResult<Self> {
        let start = date.with_day(1).ok_or_else(|| out_of_range(date))?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| out_of_range(date))?;
        Ok(DateRange { start, end })
    }

    pub fn year(date: NaiveDate) -> CalendarResult<Self> {
        let start = date.with_ordinal(1).ok_or_else(|| out_of_range(date))?;
        let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).ok_or_else(|| out_of_range(date))?;
        Ok(DateRange { start, end })
    }

    /// Viewport shown by `view` around `date`
    pub fn for_view(view: ViewKind, date: NaiveDate) -> CalendarResult<Self> {
        match view {
            ViewKind::Day => Ok(Self::day(date)),
            ViewKind::Week => Self::iso_week(date),
            ViewKind::Month => Self::month(date),
            ViewKind::Year => Self::year(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} → {}", self.start, self.end)
        }
    }
}

/// Calendar view granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Day,
    Week,
    Month,
    Year,
}

impl ViewKind {
    /// Move `date` one view-length backwards or forwards.
    pub fn step(&self, date: NaiveDate, direction: Direction) -> CalendarResult<NaiveDate> {
        let offset = match direction {
            Direction::Previous => -1,
            Direction::Next => 1,
        };
        self.shift(date, offset)
    }

    /// Move `date` by `offset` view-lengths in one go.
    /// Month and year steps clamp to the last day of shorter months.
    pub fn shift(&self, date: NaiveDate, offset: i32) -> CalendarResult<NaiveDate> {
        let count = offset.unsigned_abs();
        let shifted = match self {
            ViewKind::Day => shift_days(date, offset, u64::from(count)),
            ViewKind::Week => shift_days(date, offset, u64::from(count) * 7),
            ViewKind::Month => shift_months(date, offset, Some(count)),
            ViewKind::Year => shift_months(date, offset, count.checked_mul(12)),
        };
        shifted.ok_or_else(|| out_of_range(date))
    }
}

fn shift_days(date: NaiveDate, offset: i32, days: u64) -> Option<NaiveDate> {
    if offset < 0 {
        date.checked_sub_days(Days::new(days))
    } else {
        date.checked_add_days(Days::new(days))
    }
}

fn shift_months(date: NaiveDate, offset: i32, months: Option<u32>) -> Option<NaiveDate> {
    let months = Months::new(months?);
    if offset < 0 {
        date.checked_sub_months(months)
    } else {
        date.checked_add_months(months)
    }
}

fn out_of_range(date: NaiveDate) -> CalendarError {
    CalendarError::OutOfRange(date.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_week_starts_monday_even_from_sunday() {
        // 2026-02-01 is a Sunday
        let week = DateRange::iso_week(date(2026, 2, 1)).unwrap();
        assert_eq!(week.start, date(2026, 1, 26));
        assert_eq!(week.end, date(2026, 2, 1));

        let week = DateRange::iso_week(date(2026, 2, 2)).unwrap();
        assert_eq!(week.start, date(2026, 2, 2));
        assert_eq!(week.end, date(2026, 2, 8));
    }

    #[test]
    fn month_and_year_bounds() {
        let feb = DateRange::month(date(2026, 2, 17)).unwrap();
        assert_eq!(feb.start, date(2026, 2, 1));
        assert_eq!(feb.end, date(2026, 2, 28));

        let leap_feb = DateRange::month(date(2028, 2, 3)).unwrap();
        assert_eq!(leap_feb.end, date(2028, 2, 29));

        let year = DateRange::year(date(2026, 7, 4)).unwrap();
        assert_eq!(year.start, date(2026, 1, 1));
        assert_eq!(year.end, date(2026, 12, 31));
        assert_eq!(year.len_days(), 365);
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = DateRange::from_args("2026-05-10", "2026-05-01").unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));

        let err = DateRange::from_args("2026-05-10", "mayo").unwrap_err();
        assert!(matches!(err, CalendarError::InvalidDate(_)));
    }

    #[test]
    fn days_are_inclusive() {
        let range = DateRange::new(date(2026, 10, 5), date(2026, 10, 9)).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days.first(), Some(&date(2026, 10, 5)));
        assert_eq!(days.last(), Some(&date(2026, 10, 9)));
    }

    #[test]
    fn month_step_clamps_to_shorter_month() {
        let next_month = ViewKind::Month.step(date(2026, 1, 31), Direction::Next);
        assert_eq!(next_month.unwrap(), date(2026, 2, 28));
        let last_week = ViewKind::Week.step(date(2026, 1, 1), Direction::Previous);
        assert_eq!(last_week.unwrap(), date(2025, 12, 25));
        let next_year = ViewKind::Year.step(date(2028, 2, 29), Direction::Next);
        assert_eq!(next_year.unwrap(), date(2029, 2, 28));
    }

    #[test]
    fn shift_jumps_several_views_at_once() {
        assert_eq!(ViewKind::Month.shift(date(2026, 10, 7), -10).unwrap(), date(2025, 12, 7));
        assert_eq!(ViewKind::Week.shift(date(2026, 10, 7), 2).unwrap(), date(2026, 10, 21));
        assert_eq!(ViewKind::Year.shift(date(2026, 10, 7), 0).unwrap(), date(2026, 10, 7));
    }

    #[test]
    fn calendar_edge_is_an_error_not_a_panic() {
        let last_year = date(NaiveDate::MAX.year(), 6, 1);
        let err = ViewKind::Year.step(last_year, Direction::Next).unwrap_err();
        assert!(matches!(err, CalendarError::OutOfRange(_)));

        assert!(ViewKind::Year.shift(date(2026, 1, 1), 300_000).is_err());
        assert!(ViewKind::Month.shift(date(2026, 1, 1), i32::MIN).is_err());
        assert!(ViewKind::Day.step(NaiveDate::MIN, Direction::Previous).is_err());

        assert!(DateRange::month(NaiveDate::MAX).is_err());
        assert!(DateRange::iso_week(NaiveDate::MAX).is_err());
        assert!(DateRange::month(date(2026, 12, 5)).is_ok());
    }
}
