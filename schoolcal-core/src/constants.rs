/// Number of events listed after the featured one
pub const DEFAULT_LOOKAHEAD: usize = 7;

/// The institution's patron-saint day, shown as non-working
pub const DEFAULT_PATRON_DAY: &str = "2026-02-02";

pub const DEFAULT_INSTITUTION: &str = "IENSECAN";

pub const DEFAULT_RESOLUTION_URL: &str =
    "https://drive.google.com/file/d/1ITb8dynfmdWBttmjIyGLhQtz17URcLxG/view?usp=drive_link";

/// How often watch mode re-ranks upcoming events
pub const DEFAULT_TICK: &str = "1s";

pub const EVENTS_FILE: &str = "events.json";
pub const STATE_FILE: &str = "state.json";

/// Prefix given to records brought in through bulk import
pub const IMPORTED_ID_PREFIX: &str = "imported-";

/// Length of generated event ids
pub const ID_LEN: usize = 9;
