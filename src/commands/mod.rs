pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod new;
pub mod notifications;
pub mod remind;
pub mod resolution;
pub mod upcoming;
pub mod view;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use schoolcal_core::admin::AdminGate;
use schoolcal_core::config::SchoolcalConfig;
use schoolcal_core::date_range::parse_date;
use schoolcal_core::event::{CalendarEvent, EventFields, EventType};
use schoolcal_core::snapshot::Snapshot;
use schoolcal_core::state::{Action, CalendarState, Transition};
use schoolcal_core::{CalendarError, CalendarResult};

use crate::render;

/// Loaded config, calendar state and the snapshot it is saved to.
pub struct Session {
    pub config: SchoolcalConfig,
    pub state: CalendarState,
    pub embed: bool,
    today: NaiveDate,
    /// Day given with `--date`, if any
    pinned: Option<NaiveDate>,
    snapshot: Snapshot,
    gate: AdminGate,
}

impl Session {
    pub fn open(date: Option<NaiveDate>, embed: bool) -> Result<Self> {
        let config = SchoolcalConfig::load().context("Failed to load config")?;
        let snapshot = Snapshot::in_dir(&config.data_path());
        let today = date.unwrap_or_else(|| Local::now().date_naive());

        let state = CalendarState::new(snapshot.load_or_seed(), today);
        let gate = config.admin_gate();
        let embed = embed || config.embed;

        Ok(Session {
            config,
            state,
            embed,
            today,
            pinned: date,
            snapshot,
            gate,
        })
    }

    /// Reference date (`--date` or today)
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Read the clock again. Only the day is pinned by `--date`.
    pub fn now(&self) -> NaiveDateTime {
        pinned_instant(self.pinned, Local::now().naive_local())
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.state.events()
    }

    pub fn data_dir(&self) -> std::path::PathBuf {
        self.config.data_path()
    }

    pub fn find(&self, id: &str) -> CalendarResult<&CalendarEvent> {
        self.state
            .store
            .get(id)
            .ok_or_else(|| CalendarError::EventNotFound(id.to_string()))
    }

    /// Authenticate for admin commands, prompting when no password was given.
    pub fn login(&mut self, password: Option<String>) -> Result<()> {
        if !self.gate.is_configured() {
            let config_path = SchoolcalConfig::config_path()?;
            anyhow::bail!(
                "No admin password is configured.\n\n\
                Set one in {}:\n  \
                admin_password = \"...\"\n\n\
                or export SCHOOLCAL_ADMIN_PASSWORD.",
                config_path.display()
            );
        }

        let password = match password {
            Some(p) => p,
            None => {
                rpassword::prompt_password("Admin password: ").context("Failed to read password")?
            }
        };

        self.apply(Action::Login(password))?;
        Ok(())
    }

    /// Apply an action and persist the snapshot if events changed.
    pub fn apply(&mut self, action: Action) -> Result<Transition> {
        let transition = self.state.apply(action, &self.gate)?;

        if let Transition::EventsChanged { ref affected } = transition {
            self.snapshot
                .save(self.state.events())
                .with_context(|| format!("Failed to save {}", self.snapshot.path().display()))?;
            tracing::debug!(count = affected.len(), "events changed");
        }

        Ok(transition)
    }

    fn chrome(&self) -> render::Chrome<'_> {
        render::Chrome {
            institution: &self.config.institution,
            embed: self.embed,
        }
    }

    pub fn print_header(&self, subtitle: &str) {
        if let Some(header) = self.chrome().header(subtitle) {
            println!("{}\n", header);
        }
    }

    pub fn print_footer(&self) {
        if let Some(footer) = self.chrome().footer() {
            println!("\n{}", footer);
        }
    }
}

/// `wall` moved onto the pinned day, keeping its time of day.
fn pinned_instant(pinned: Option<NaiveDate>, wall: NaiveDateTime) -> NaiveDateTime {
    match pinned {
        Some(day) => day.and_time(wall.time()),
        None => wall,
    }
}

/// Event fields given on the command line; anything missing may be prompted.
#[derive(Debug, Default)]
pub struct EventForm {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub event_type: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub participants: Option<String>,
    pub observations: Option<String>,
}

impl EventForm {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.event_type.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.participants.is_none()
            && self.observations.is_none()
    }

    /// Overwrite `fields` with every value given. An empty string clears an
    /// optional field.
    pub fn merge_into(self, fields: &mut EventFields) -> Result<()> {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(start) = self.start {
            fields.start = parse_date(&start)?;
        }
        if let Some(end) = self.end {
            fields.end = parse_date(&end)?;
        }
        if let Some(event_type) = self.event_type {
            fields.event_type = event_type.parse::<EventType>()?;
        }
        if self.time.is_some() {
            fields.time = self.time;
        }
        if self.location.is_some() {
            fields.location = self.location;
        }
        if self.participants.is_some() {
            fields.participants = self.participants;
        }
        if self.observations.is_some() {
            fields.observations = self.observations;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn merge_overrides_only_given_values() {
        let mut fields =
            EventFields::new("Receso", date(2026, 10, 5), date(2026, 10, 9), EventType::Vacation);
        fields.location = Some("Sede".to_string());

        let form = EventForm {
            end: Some("2026-10-10".to_string()),
            event_type: Some("festivo".to_string()),
            time: Some("07:00".to_string()),
            ..EventForm::default()
        };
        assert!(!form.is_empty());
        form.merge_into(&mut fields).unwrap();

        assert_eq!(fields.title, "Receso");
        assert_eq!(fields.end, date(2026, 10, 10));
        assert_eq!(fields.event_type, EventType::Holiday);
        assert_eq!(fields.time.as_deref(), Some("07:00"));
        assert_eq!(fields.location.as_deref(), Some("Sede"));
    }

    #[test]
    fn clock_follows_the_wall_unless_a_day_is_pinned() {
        let after_midnight = date(2026, 1, 11).and_hms_opt(0, 0, 1).unwrap();
        assert_eq!(pinned_instant(None, after_midnight), after_midnight);

        let pinned = pinned_instant(Some(date(2026, 3, 2)), after_midnight);
        assert_eq!(pinned, date(2026, 3, 2).and_hms_opt(0, 0, 1).unwrap());
    }

    #[test]
    fn merge_rejects_bad_dates() {
        let mut fields =
            EventFields::new("Receso", date(2026, 10, 5), date(2026, 10, 9), EventType::Vacation);
        let form = EventForm {
            start: Some("05/10/2026".to_string()),
            ..EventForm::default()
        };
        assert!(form.merge_into(&mut fields).is_err());
        assert!(EventForm::default().is_empty());
    }
}
