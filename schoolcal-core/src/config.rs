//! schoolcal configuration.
//!
//! Read from ~/.config/schoolcal/config.toml, with `SCHOOLCAL_*` environment
//! variables taking precedence (e.g. `SCHOOLCAL_ADMIN_PASSWORD`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::admin::AdminGate;
use crate::constants::{
    DEFAULT_INSTITUTION, DEFAULT_LOOKAHEAD, DEFAULT_PATRON_DAY, DEFAULT_RESOLUTION_URL,
    DEFAULT_TICK,
};
use crate::error::{CalendarError, CalendarResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/schoolcal";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_institution() -> String {
    DEFAULT_INSTITUTION.to_string()
}

fn default_patron_day() -> Option<NaiveDate> {
    NaiveDate::parse_from_str(DEFAULT_PATRON_DAY, "%Y-%m-%d").ok()
}

fn default_lookahead() -> usize {
    DEFAULT_LOOKAHEAD
}

fn default_tick() -> String {
    DEFAULT_TICK.to_string()
}

fn default_resolution_url() -> String {
    DEFAULT_RESOLUTION_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolcalConfig {
    /// Where events.json and state.json live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_institution")]
    pub institution: String,

    /// Shared password for edit commands. Never written back out.
    #[serde(default, skip_serializing)]
    pub admin_password: Option<String>,

    #[serde(default = "default_patron_day", skip_serializing_if = "Option::is_none")]
    pub patron_day: Option<NaiveDate>,

    /// How many events to list after the featured one
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,

    /// Refresh interval for `upcoming --watch`, e.g. "1s" or "30s"
    #[serde(default = "default_tick")]
    pub tick: String,

    #[serde(default = "default_resolution_url")]
    pub resolution_url: String,

    /// Reduced chrome: no header or footer around views
    #[serde(default)]
    pub embed: bool,
}

impl Default for SchoolcalConfig {
    fn default() -> Self {
        SchoolcalConfig {
            data_dir: default_data_dir(),
            institution: default_institution(),
            admin_password: None,
            patron_day: default_patron_day(),
            lookahead: default_lookahead(),
            tick: default_tick(),
            resolution_url: default_resolution_url(),
            embed: false,
        }
    }
}

impl SchoolcalConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("schoolcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, writing a commented default file on first run.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from `path` (optional) layered with the environment.
    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        Self::load_layered(path, Environment::with_prefix("SCHOOLCAL"))
    }

    fn load_layered(path: &Path, env: Environment) -> CalendarResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// data_dir with `~` expanded
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn admin_gate(&self) -> AdminGate {
        AdminGate::new(self.admin_password.clone())
    }

    pub fn tick_interval(&self) -> CalendarResult<Duration> {
        let tick = humantime::parse_duration(&self.tick)
            .map_err(|e| CalendarError::Config(format!("invalid tick '{}': {e}", self.tick)))?;

        if tick.is_zero() {
            return Err(CalendarError::Config("tick must be longer than zero".into()));
        }
        Ok(tick)
    }

    /// Effective settings as TOML, without the admin password.
    pub fn render(&self) -> CalendarResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# schoolcal configuration

# Where the event snapshot is stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Password for new/edit/delete/import (or set SCHOOLCAL_ADMIN_PASSWORD):
# admin_password = \"\"

# institution = \"{DEFAULT_INSTITUTION}\"
# patron_day = \"{DEFAULT_PATRON_DAY}\"

# Events listed after the featured one in `schoolcal upcoming`:
# lookahead = {DEFAULT_LOOKAHEAD}

# Refresh interval for `schoolcal upcoming --watch`:
# tick = \"{DEFAULT_TICK}\"

# embed = false
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commented_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        SchoolcalConfig::create_default_config(&path).unwrap();

        let config = SchoolcalConfig::load_from(&path).unwrap();
        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.lookahead, 7);
        assert_eq!(config.patron_day, default_patron_day());
        assert_eq!(config.tick_interval().unwrap(), Duration::from_secs(1));
        assert!(!config.embed);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "/srv/calendar"
admin_password = "clave"
lookahead = 3
tick = "30s"
patron_day = "2027-02-02"
"#,
        )
        .unwrap();

        let config = SchoolcalConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/srv/calendar"));
        assert!(config.admin_gate().verify("clave").is_ok());
        assert_eq!(config.lookahead, 3);
        assert_eq!(config.tick_interval().unwrap(), Duration::from_secs(30));
        assert_eq!(config.patron_day, NaiveDate::from_ymd_opt(2027, 2, 2));
    }

    #[test]
    fn environment_overrides_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "admin_password = \"clave\"\nlookahead = 3\n").unwrap();

        let vars: config::Map<String, String> = [
            ("SCHOOLCAL_ADMIN_PASSWORD", "desde-env"),
            ("SCHOOLCAL_LOOKAHEAD", "5"),
            ("SCHOOLCAL_EMBED", "true"),
            ("OTHER_LOOKAHEAD", "9"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let env = Environment::with_prefix("SCHOOLCAL").source(Some(vars));

        let config = SchoolcalConfig::load_layered(&path, env).unwrap();
        assert!(config.admin_gate().verify("desde-env").is_ok());
        assert!(config.admin_gate().verify("clave").is_err());
        assert_eq!(config.lookahead, 5);
        assert!(config.embed);
    }

    #[test]
    fn rendered_config_hides_the_password() {
        let config = SchoolcalConfig {
            admin_password: Some("clave".to_string()),
            ..SchoolcalConfig::default()
        };

        let rendered = config.render().unwrap();
        assert!(rendered.contains("lookahead = 7"));
        assert!(!rendered.contains("clave"));
    }

    #[test]
    fn bad_tick_is_a_config_error() {
        let config = SchoolcalConfig {
            tick: "often".to_string(),
            ..SchoolcalConfig::default()
        };
        assert!(matches!(config.tick_interval(), Err(CalendarError::Config(_))));

        let zero = SchoolcalConfig {
            tick: "0s".to_string(),
            ..SchoolcalConfig::default()
        };
        assert!(zero.tick_interval().is_err());
    }
}
