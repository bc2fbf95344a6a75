//! In-memory event collection with create / update / delete.
//!
//! Unknown ids are reported as `EventNotFound` instead of being ignored, and a
//! failed operation never changes the collection.

use crate::constants::{ID_LEN, IMPORTED_ID_PREFIX};
use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventFields};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        EventStore { events }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CalendarEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Validate `fields`, give them a fresh id and put the event first.
    pub fn create(&mut self, fields: EventFields) -> CalendarResult<&CalendarEvent> {
        let event = fields.into_event(self.fresh_id(""))?;
        self.events.insert(0, event);
        Ok(&self.events[0])
    }

    /// Replace the event with `id`, keeping its id and position.
    pub fn update(&mut self, id: &str, fields: EventFields) -> CalendarResult<&CalendarEvent> {
        let index = self.position(id)?;
        let event = fields.into_event(id.to_string())?;
        self.events[index] = event;
        Ok(&self.events[index])
    }

    /// Remove and return the event with `id`.
    pub fn delete(&mut self, id: &str) -> CalendarResult<CalendarEvent> {
        let index = self.position(id)?;
        Ok(self.events.remove(index))
    }

    /// Put a bulk-imported batch in front of the collection.
    ///
    /// Every record is re-validated and re-identified so imported ids never
    /// collide with existing ones. Returns the number of events added.
    pub fn import(&mut self, batch: Vec<CalendarEvent>) -> CalendarResult<usize> {
        let mut imported = Vec::with_capacity(batch.len());
        for event in batch {
            let id = self.fresh_id(IMPORTED_ID_PREFIX);
            imported.push(EventFields::from_event(&event).into_event(id)?);
        }

        let count = imported.len();
        self.events.splice(0..0, imported);
        Ok(count)
    }

    fn position(&self, id: &str) -> CalendarResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::EventNotFound(id.to_string()))
    }

    fn fresh_id(&self, prefix: &str) -> String {
        loop {
            let id = format!("{}{}", prefix, generate_id());
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Short random lowercase id, e.g. `k3f9a0c1b`.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(ID_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields(title: &str) -> EventFields {
        EventFields::new(title, date(2026, 2, 15), date(2026, 2, 15), EventType::Institutional)
    }

    fn seeded() -> EventStore {
        let events = ["a", "b", "c"]
            .into_iter()
            .map(|id| fields(id).into_event(id.to_string()).unwrap())
            .collect();
        EventStore::new(events)
    }

    #[test]
    fn create_prepends_with_fresh_id() {
        let mut store = seeded();
        let id = store.create(fields("Consejo directivo")).unwrap().id.clone();

        assert_eq!(id.len(), ID_LEN);
        assert_eq!(store.events()[0].id, id);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn create_rejects_invalid_fields_without_changing_store() {
        let mut store = seeded();
        let before = store.clone();

        let mut bad = fields("Receso");
        bad.end = date(2026, 2, 1);
        assert!(store.create(bad).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut store = seeded();
        let mut changed = fields("b renamed");
        changed.time = Some("07:00 AM".to_string());

        let updated = store.update("b", changed).unwrap();
        assert_eq!(updated.id, "b");
        assert_eq!(updated.title, "b renamed");
        assert_eq!(store.events()[1].title, "b renamed");
    }

    #[test]
    fn update_unknown_id_is_reported() {
        let mut store = seeded();
        let err = store.update("zzz", fields("x")).unwrap_err();
        assert!(matches!(err, CalendarError::EventNotFound(id) if id == "zzz"));
    }

    #[test]
    fn delete_removes_matching_event() {
        let mut store = seeded();
        let removed = store.delete("a").unwrap();
        assert_eq!(removed.id, "a");
        assert!(store.get("a").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_unknown_id_leaves_collection_unchanged() {
        let mut store = seeded();
        let before = store.clone();

        assert!(matches!(store.delete("missing"), Err(CalendarError::EventNotFound(_))));
        assert_eq!(store.len(), before.len());
        assert_eq!(store, before);
    }

    #[test]
    fn import_prepends_batch_with_imported_ids() {
        let mut store = seeded();
        let batch = vec![
            fields("Taller de padres").into_event("x".to_string()).unwrap(),
            fields("Consejo").into_event("x".to_string()).unwrap(),
        ];

        assert_eq!(store.import(batch).unwrap(), 2);
        assert_eq!(store.len(), 5);
        assert_eq!(store.events()[0].title, "Taller de padres");
        assert!(store.events()[0].id.starts_with(IMPORTED_ID_PREFIX));
        assert_ne!(store.events()[0].id, store.events()[1].id);
        assert_eq!(store.events()[2].id, "a");
    }
}
