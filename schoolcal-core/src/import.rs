//! Bulk import from a JSON file.
//!
//! The file holds an array of event records in snapshot format. Ids are
//! optional since the store assigns fresh ones anyway.

use std::path::Path;

use serde_json::Value;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventFields};

pub fn read_batch(path: &Path) -> CalendarResult<Vec<CalendarEvent>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CalendarError::Import(format!("{}: {e}", path.display())))?;
    parse_batch(&content)
}

/// Decode and validate every record; the first bad one fails the whole batch.
pub fn parse_batch(content: &str) -> CalendarResult<Vec<CalendarEvent>> {
    let records: Vec<Value> = serde_json::from_str(content)
        .map_err(|e| CalendarError::Import(format!("expected a JSON array of events: {e}")))?;

    if records.is_empty() {
        return Err(CalendarError::Import("no events to import".into()));
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, mut record: Value) -> CalendarResult<CalendarEvent> {
    if let Value::Object(ref mut map) = record {
        map.entry("id").or_insert_with(|| Value::String(String::new()));
    }

    let event: CalendarEvent = serde_json::from_value(record)
        .map_err(|e| CalendarError::Import(format!("record {}: {e}", index + 1)))?;

    EventFields::from_event(&event)
        .validate()
        .map_err(|e| CalendarError::Import(format!("record {}: {e}", index + 1)))?;

    Ok(event)
}
