//! Application state and its transitions.
//!
//! Everything the calendar screen depends on lives in `CalendarState` and only
//! changes through `apply`. A failed action leaves the state as it was.

use chrono::NaiveDate;

use crate::admin::AdminGate;
use crate::date_range::{DateRange, Direction, ViewKind};
use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventFields};
use crate::membership::events_in_range;
use crate::store::EventStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Grid,
    List,
}

#[derive(Debug, Clone)]
pub enum Action {
    Navigate(Direction),
    GoTo(NaiveDate),
    SetView(ViewKind),
    SetDisplay(DisplayMode),
    /// Ad-hoc search; switches to the list display
    SearchRange(DateRange),
    ClearSearch,
    Login(String),
    Logout,
    Create(EventFields),
    Update { id: String, fields: EventFields },
    Delete(String),
    Import(Vec<CalendarEvent>),
}

impl Action {
    fn mutates_events(&self) -> bool {
        matches!(
            self,
            Action::Create(_) | Action::Update { .. } | Action::Delete(_) | Action::Import(_)
        )
    }
}

/// What the caller has to do after a successful `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Only view state changed; re-render.
    ViewChanged,
    /// The event collection changed; persist the full snapshot and re-render.
    EventsChanged { affected: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub store: EventStore,
    pub current_date: NaiveDate,
    pub view: ViewKind,
    pub display: DisplayMode,
    pub range_search: Option<DateRange>,
    pub authenticated: bool,
}

impl CalendarState {
    pub fn new(events: Vec<CalendarEvent>, today: NaiveDate) -> Self {
        CalendarState {
            store: EventStore::new(events),
            current_date: today,
            view: ViewKind::Month,
            display: DisplayMode::Grid,
            range_search: None,
            authenticated: false,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.store.events()
    }

    /// The active range search, or the viewport of the current view.
    pub fn viewport(&self) -> CalendarResult<DateRange> {
        match self.range_search {
            Some(range) => Ok(range),
            None => DateRange::for_view(self.view, self.current_date),
        }
    }

    /// Events listed for the current viewport, sorted by start date.
    pub fn visible_events(&self) -> CalendarResult<Vec<&CalendarEvent>> {
        Ok(events_in_range(self.store.events(), &self.viewport()?))
    }

    pub fn apply(&mut self, action: Action, gate: &AdminGate) -> CalendarResult<Transition> {
        if action.mutates_events() && !self.authenticated {
            return Err(CalendarError::Unauthorized);
        }

        match action {
            Action::Navigate(direction) => {
                self.current_date = self.view.step(self.current_date, direction)?;
            }
            Action::GoTo(date) => self.current_date = date,
            Action::SetView(view) => self.view = view,
            Action::SetDisplay(display) => self.display = display,
            Action::SearchRange(range) => {
                self.range_search = Some(range);
                self.display = DisplayMode::List;
            }
            Action::ClearSearch => {
                self.range_search = None;
                self.display = DisplayMode::Grid;
            }
            Action::Login(password) => {
                gate.verify(&password)?;
                self.authenticated = true;
            }
            Action::Logout => self.authenticated = false,
            Action::Create(fields) => {
                let id = self.store.create(fields)?.id.clone();
                return Ok(Transition::EventsChanged { affected: vec![id] });
            }
            Action::Update { id, fields } => {
                self.store.update(&id, fields)?;
                return Ok(Transition::EventsChanged { affected: vec![id] });
            }
            Action::Delete(id) => {
                self.store.delete(&id)?;
                return Ok(Transition::EventsChanged { affected: vec![id] });
            }
            Action::Import(batch) => {
                let count = self.store.import(batch)?;
                let affected = self.store.events()[..count]
                    .iter()
                    .map(|e| e.id.clone())
                    .collect();
                return Ok(Transition::EventsChanged { affected });
            }
        }

        Ok(Transition::ViewChanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gate() -> AdminGate {
        AdminGate::new(Some("secreto".to_string()))
    }

    fn state() -> CalendarState {
        let events = vec![
            EventFields::new(
                "Receso Octubre",
                date(2026, 10, 5),
                date(2026, 10, 9),
                EventType::Vacation,
            )
            .into_event("v2".to_string())
            .unwrap(),
            EventFields::new(
                "Día de la Raza",
                date(2026, 10, 12),
                date(2026, 10, 12),
                EventType::Holiday,
            )
            .into_event("f14".to_string())
            .unwrap(),
        ];
        CalendarState::new(events, date(2026, 10, 7))
    }

    #[test]
    fn edits_require_login() {
        let mut state = state();
        let create = Action::Create(EventFields::new(
            "Entrega de boletines",
            date(2026, 10, 16),
            date(2026, 10, 16),
            EventType::Academic,
        ));

        let denied = state.apply(create.clone(), &gate());
        assert!(matches!(denied, Err(CalendarError::Unauthorized)));
        assert_eq!(state.events().len(), 2);

        state.apply(Action::Login("secreto".to_string()), &gate()).unwrap();
        let transition = state.apply(create, &gate()).unwrap();
        assert!(matches!(
            transition,
            Transition::EventsChanged { ref affected } if affected.len() == 1
        ));
        assert_eq!(state.events().len(), 3);
    }

    #[test]
    fn wrong_password_keeps_state_logged_out() {
        let mut state = state();
        let err = state.apply(Action::Login("nope".to_string()), &gate()).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCredentials));
        assert!(!state.authenticated);
    }

    #[test]
    fn week_view_shows_events_of_the_iso_week() {
        let mut state = state();
        state.apply(Action::SetView(ViewKind::Week), &gate()).unwrap();

        let titles: Vec<_> = state
            .visible_events()
            .unwrap()
            .iter()
            .map(|e| e.title.clone())
            .collect();
        assert_eq!(titles, vec!["Receso Octubre"]);

        state.apply(Action::Navigate(Direction::Next), &gate()).unwrap();
        assert_eq!(state.current_date, date(2026, 10, 14));
        let titles: Vec<_> = state
            .visible_events()
            .unwrap()
            .iter()
            .map(|e| e.title.clone())
            .collect();
        assert_eq!(titles, vec!["Día de la Raza"]);
    }

    #[test]
    fn range_search_switches_to_list_and_clear_restores_grid() {
        let mut state = state();
        let range = DateRange::new(date(2026, 10, 8), date(2026, 10, 20)).unwrap();

        state.apply(Action::SearchRange(range), &gate()).unwrap();
        assert_eq!(state.display, DisplayMode::List);
        assert_eq!(state.visible_events().unwrap().len(), 2);

        state.apply(Action::ClearSearch, &gate()).unwrap();
        assert_eq!(state.display, DisplayMode::Grid);
        assert_eq!(state.viewport().unwrap(), DateRange::month(date(2026, 10, 7)).unwrap());
    }

    #[test]
    fn navigating_past_the_calendar_edge_keeps_the_date() {
        let mut state = state();
        let last = NaiveDate::from_ymd_opt(NaiveDate::MAX.year(), 6, 1).unwrap();
        state.apply(Action::GoTo(last), &gate()).unwrap();
        state.apply(Action::SetView(ViewKind::Year), &gate()).unwrap();

        let err = state.apply(Action::Navigate(Direction::Next), &gate()).unwrap_err();
        assert!(matches!(err, CalendarError::OutOfRange(_)));
        assert_eq!(state.current_date, last);
    }

    #[test]
    fn failed_delete_reports_not_found() {
        let mut state = state();
        state.apply(Action::Login("secreto".to_string()), &gate()).unwrap();

        let err = state.apply(Action::Delete("nope".to_string()), &gate()).unwrap_err();
        assert!(matches!(err, CalendarError::EventNotFound(_)));
        assert_eq!(state.events().len(), 2);
    }
}
