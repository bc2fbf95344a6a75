use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use schoolcal_core::date_range::parse_date;
use schoolcal_core::event::{EventFields, EventType};
use schoolcal_core::state::{Action, Transition};

use crate::commands::{EventForm, Session};
use crate::utils::tui;

pub fn run(session: &mut Session, form: EventForm) -> Result<()> {
    let interactive = form.title.is_none() || form.start.is_none() || form.event_type.is_none();

    // --- Title ---
    let title = match form.title {
        Some(t) => t,
        None => Input::<String>::new().with_prompt("  Title").interact_text()?,
    };

    // --- Dates ---
    let start = match form.start {
        Some(s) => parse_date(&s)?,
        None => tui::prompt_date("  First day", Some(session.today()))?,
    };

    let end = match form.end {
        Some(e) => parse_date(&e)?,
        None if interactive => tui::prompt_date("  Last day", Some(start))?,
        None => start,
    };

    // --- Type ---
    let event_type = match form.event_type {
        Some(t) => t.parse::<EventType>()?,
        None => tui::prompt_type(EventType::Academic)?,
    };

    // --- Details ---
    let mut fields = EventFields::new(title, start, end, event_type);
    fields.time = detail(form.time, interactive, "  Time (skip)")?;
    fields.location = detail(form.location, interactive, "  Where? (skip)")?;
    fields.participants = detail(form.participants, interactive, "  Participants (skip)")?;
    fields.observations = detail(form.observations, interactive, "  Observations (skip)")?;

    let transition = session.apply(Action::Create(fields))?;

    if interactive {
        println!();
    }
    if let Transition::EventsChanged { affected } = transition {
        for id in affected {
            let event = session.find(&id)?;
            println!("{}", format!("  Created: {} ({})", event.title, event.id).green());
        }
    }

    Ok(())
}

fn detail(value: Option<String>, interactive: bool, prompt: &str) -> Result<Option<String>> {
    match value {
        Some(v) => Ok(Some(v)),
        None if interactive => tui::prompt_optional(prompt, None),
        None => Ok(None),
    }
}
