use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::Session;

pub fn run(session: &Session) -> Result<()> {
    let url = &session.config.resolution_url;

    println!("Opening the calendar resolution...");
    if let Err(e) = open::that(url) {
        tracing::debug!(error = %e, "could not launch a browser");
        println!("  {}", "Could not open a browser. The document is at:".yellow());
    }
    println!("  {}", url.dimmed());

    Ok(())
}
