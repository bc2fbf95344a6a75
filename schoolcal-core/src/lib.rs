//! Core types for schoolcal.
//!
//! This crate holds everything the terminal front end renders from:
//! - `event` / `fixtures`: the calendar event model and the seeded school year
//! - `date_range`, `membership`, `grid`: viewports and which events fall in them
//! - `upcoming`: the featured-event ranking
//! - `store` / `state`: admin-gated CRUD behind a reducer
//! - `snapshot`, `local_state`, `config`: persistence and configuration
//! - `import` / `export`: bulk JSON import and iCalendar export

pub mod admin;
pub mod config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod export;
pub mod fixtures;
pub mod grid;
pub mod import;
pub mod local_state;
pub mod membership;
pub mod reminders;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod upcoming;

pub use error::{CalendarError, CalendarResult};
pub use event::{CalendarEvent, EventFields, EventType};
