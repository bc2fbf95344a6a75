use anyhow::Result;
use notify_rust::Notification;
use owo_colors::OwoColorize;
use schoolcal_core::local_state::LocalState;
use schoolcal_core::reminders::{self, Reminder};

use crate::commands::Session;

pub fn run(session: &Session) -> Result<()> {
    let data_dir = session.data_dir();
    let mut state = LocalState::load(&data_dir);

    if !state.notifications_enabled {
        println!(
            "{}",
            "Reminders are off. Turn them on with `schoolcal notifications on`".dimmed()
        );
        return Ok(());
    }

    let today = session.today();
    let pending = reminders::pending(session.events(), today, &state);

    if pending.is_empty() {
        println!("{}", "No reminders for tomorrow".dimmed());
    }

    for reminder in &pending {
        deliver(&session.config.institution, reminder);
    }

    reminders::mark_sent(&mut state, &pending, today);
    state.save(&data_dir)?;

    Ok(())
}

/// Desktop notification, or a printed line when none can be shown.
fn deliver(institution: &str, reminder: &Reminder) {
    let result = Notification::new()
        .summary(&format!("{} calendar", institution))
        .body(&reminder.body())
        .show();

    match result {
        Ok(_) => println!("  {} {}", "Sent:".green(), reminder.body()),
        Err(e) => {
            tracing::debug!(error = %e, "desktop notification unavailable");
            println!("  {} {}", "Reminder:".yellow(), reminder.body());
        }
    }
}
