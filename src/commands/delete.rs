use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use schoolcal_core::state::Action;

use crate::commands::Session;
use crate::render;

pub fn run(session: &mut Session, id: &str, force: bool) -> Result<()> {
    let event = session.find(id)?;
    let title = event.title.clone();

    // Confirm unless --force
    if !force {
        println!("{}\n", render::card(event));
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", title))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    session.apply(Action::Delete(id.to_string()))?;
    println!("{}", format!("  Deleted: {} ({})", title, id).red());

    Ok(())
}
