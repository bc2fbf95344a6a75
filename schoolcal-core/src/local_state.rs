//! Per-installation preferences that are not part of the event snapshot.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::STATE_FILE;
use crate::error::CalendarResult;

/// Stored in `state.json` next to the event snapshot.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalState {
    /// Day-before reminders switched on
    #[serde(default)]
    pub notifications_enabled: bool,

    /// Reminder keys already delivered (see `reminders::notified_key`)
    #[serde(default)]
    pub notified: BTreeSet<String>,
}

impl LocalState {
    /// Load state from `data_dir`, defaults if absent or unreadable.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(STATE_FILE);

        if !path.exists() {
            return Self::default();
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(crate::error::CalendarError::from)
            .and_then(|content| Ok(serde_json::from_str(&content)?));

        match parsed {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable local state"
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> CalendarResult<()> {
        std::fs::create_dir_all(data_dir)?;

        let path = data_dir.join(STATE_FILE);
        let temp = data_dir.join(format!("{STATE_FILE}.tmp"));

        std::fs::write(&temp, serde_json::to_string_pretty(self)?)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_state_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LocalState::load(dir.path()), LocalState::default());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = LocalState::default();
        state.notifications_enabled = true;
        state.notified.insert("notified_f1_20260101".to_string());

        state.save(dir.path()).unwrap();
        assert_eq!(LocalState::load(dir.path()), state);
    }

    #[test]
    fn garbage_state_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STATE_FILE), "not json").unwrap();
        assert_eq!(LocalState::load(dir.path()), LocalState::default());
    }
}
