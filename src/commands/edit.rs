use anyhow::Result;
use owo_colors::OwoColorize;
use schoolcal_core::event::EventFields;
use schoolcal_core::state::Action;

use crate::commands::{EventForm, Session};
use crate::render;
use crate::utils::tui;

pub fn run(session: &mut Session, id: &str, form: EventForm) -> Result<()> {
    let existing = session.find(id)?;
    let mut fields = EventFields::from_event(existing);

    if form.is_empty() {
        println!("{}\n", render::card(existing));
        prompt_all(&mut fields)?;
    } else {
        form.merge_into(&mut fields)?;
    }

    session.apply(Action::Update {
        id: id.to_string(),
        fields,
    })?;

    let event = session.find(id)?;
    println!("{}", format!("  Updated: {} ({})", event.title, event.id).green());

    Ok(())
}

/// Walk through every field, current values as defaults.
fn prompt_all(fields: &mut EventFields) -> Result<()> {
    fields.title = dialoguer::Input::<String>::new()
        .with_prompt("  Title")
        .default(fields.title.clone())
        .interact_text()?;
    fields.start = tui::prompt_date("  First day", Some(fields.start))?;
    fields.end = tui::prompt_date("  Last day", Some(fields.end.max(fields.start)))?;
    fields.event_type = tui::prompt_type(fields.event_type)?;
    fields.time = tui::prompt_optional("  Time", fields.time.as_deref())?;
    fields.location = tui::prompt_optional("  Where?", fields.location.as_deref())?;
    fields.participants = tui::prompt_optional("  Participants", fields.participants.as_deref())?;
    fields.observations = tui::prompt_optional("  Observations", fields.observations.as_deref())?;
    Ok(())
}
