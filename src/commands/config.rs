use anyhow::Result;
use owo_colors::OwoColorize;
use schoolcal_core::config::SchoolcalConfig;
use schoolcal_core::constants::{EVENTS_FILE, STATE_FILE};

use crate::commands::Session;

pub fn run(session: &Session) -> Result<()> {
    let config_path = SchoolcalConfig::config_path()?;
    let data_dir = session.data_dir();

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", data_dir.join(EVENTS_FILE).display());
    println!("  State:   {}", data_dir.join(STATE_FILE).display());

    println!("\n{}", "Settings".bold());
    for line in session.config.render()?.lines() {
        println!("  {}", line);
    }

    let admin = if session.config.admin_gate().is_configured() {
        "configured".green().to_string()
    } else {
        "not set".yellow().to_string()
    };
    println!("  admin_password: {}", admin);

    Ok(())
}
