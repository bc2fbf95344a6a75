use anyhow::Result;
use owo_colors::OwoColorize;
use schoolcal_core::local_state::LocalState;

use crate::commands::Session;

pub fn run(session: &Session, enabled: bool) -> Result<()> {
    let data_dir = session.data_dir();
    let mut state = LocalState::load(&data_dir);

    state.notifications_enabled = enabled;
    state.save(&data_dir)?;

    if enabled {
        println!("{}", "  Reminders on: run `schoolcal remind` daily to get them".green());
    } else {
        println!("{}", "  Reminders off".dimmed());
    }
    Ok(())
}
