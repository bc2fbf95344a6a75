//! Full-collection snapshot on disk.
//!
//! The whole event list is one JSON array, rewritten after every change.
//! A missing snapshot, or one that fails to parse or validate, falls back to
//! the seeded school year.

use std::path::{Path, PathBuf};

use crate::constants::EVENTS_FILE;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventFields};
use crate::fixtures::seed_events;

#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Snapshot { path: path.into() }
    }

    /// Snapshot stored as `events.json` inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(EVENTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored events, `None` if nothing has been saved yet.
    pub fn load(&self) -> CalendarResult<Option<Vec<CalendarEvent>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(from_json(&content)?))
    }

    /// Stored events, or the seeded list when there are none or they can't be read.
    pub fn load_or_seed(&self) -> Vec<CalendarEvent> {
        match self.load() {
            Ok(Some(events)) => events,
            Ok(None) => seed_events(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "stored events could not be read, using the seeded calendar"
                );
                seed_events()
            }
        }
    }

    /// Overwrite the snapshot with `events`.
    pub fn save(&self, events: &[CalendarEvent]) -> CalendarResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, to_json(events)?)?;
        std::fs::rename(&temp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = events.len(), "saved snapshot");
        Ok(())
    }
}

pub fn to_json(events: &[CalendarEvent]) -> CalendarResult<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Parse a snapshot, rejecting it whole if any record fails validation.
pub fn from_json(content: &str) -> CalendarResult<Vec<CalendarEvent>> {
    let events: Vec<CalendarEvent> = serde_json::from_str(content)?;

    for event in &events {
        EventFields::from_event(event)
            .validate()
            .map_err(|e| CalendarError::Validation(format!("stored event {}: {e}", event.id)))?;
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventFields, EventType};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<CalendarEvent> {
        let mut welcome = EventFields::new(
            "Acto de bienvenida",
            date(2026, 1, 26),
            date(2026, 1, 26),
            EventType::Academic,
        );
        welcome.time = Some("06:45".to_string());

        vec![
            welcome.into_event("h1".to_string()).unwrap(),
            EventFields::new(
                "Vacaciones",
                date(2026, 6, 29),
                date(2026, 7, 17),
                EventType::Vacation,
            )
            .into_event("v1".to_string())
            .unwrap(),
        ]
    }

    #[test]
    fn save_then_load_preserves_events() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::in_dir(&dir.path().join("nested"));
        let events = sample();

        snapshot.save(&events).unwrap();
        let loaded = snapshot.load().unwrap().unwrap();

        assert_eq!(loaded.len(), events.len());
        for (a, b) in loaded.iter().zip(&events) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            assert_eq!(a.event_type, b.event_type);
            assert_eq!(a.start, b.start);
            assert_eq!(a.end, b.end);
        }
        assert_eq!(loaded, events);
    }

    #[test]
    fn missing_snapshot_seeds_the_school_year() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::in_dir(dir.path());

        assert!(snapshot.load().unwrap().is_none());
        assert_eq!(snapshot.load_or_seed(), seed_events());
    }

    #[test]
    fn malformed_snapshot_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::in_dir(dir.path());
        std::fs::write(snapshot.path(), "[{\"id\": \"broken\"").unwrap();

        assert!(snapshot.load().is_err());
        assert_eq!(snapshot.load_or_seed(), seed_events());
    }

    #[test]
    fn inverted_stored_record_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::in_dir(dir.path());
        std::fs::write(
            snapshot.path(),
            r#"[{"id": "x", "title": "Receso", "start": "2026-03-10", "end": "2026-03-01",
                 "type": "holiday"}]"#,
        )
        .unwrap();

        let err = snapshot.load().unwrap_err();
        match err {
            CalendarError::Validation(msg) => assert!(msg.contains("stored event x"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(snapshot.load_or_seed(), seed_events());
    }

    #[test]
    fn empty_saved_list_is_kept_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::in_dir(dir.path());

        snapshot.save(&[]).unwrap();
        assert!(snapshot.load_or_seed().is_empty());
    }
}
