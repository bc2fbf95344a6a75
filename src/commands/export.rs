use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use schoolcal_core::export::generate_ics;

use crate::commands::Session;

pub fn run(session: &Session, file: &Path) -> Result<()> {
    let ics = generate_ics(session.events(), &session.config.institution)?;

    std::fs::write(file, ics).with_context(|| format!("Failed to write {}", file.display()))?;

    println!(
        "{}",
        format!("  Exported {} events to {}", session.events().len(), file.display()).green()
    );
    Ok(())
}
