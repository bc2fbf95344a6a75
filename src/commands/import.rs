use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use schoolcal_core::import::read_batch;
use schoolcal_core::state::{Action, Transition};

use crate::commands::Session;
use crate::utils::tui;

/// Pause between records so the progress bar is readable for small files
const RECORD_DELAY: Duration = Duration::from_millis(40);

pub async fn run(session: &mut Session, file: &Path) -> Result<()> {
    let batch = read_batch(file)?;

    let progress = tui::create_progress(batch.len() as u64, "Reading events".to_string());
    for event in &batch {
        progress.set_message(event.title.clone());
        tokio::time::sleep(RECORD_DELAY).await;
        progress.inc(1);
    }
    progress.finish_and_clear();

    let spinner = tui::create_spinner("Saving".to_string());
    let result = session.apply(Action::Import(batch));
    spinner.finish_and_clear();

    if let Transition::EventsChanged { affected } = result? {
        println!(
            "{}",
            format!(
                "  Imported {} {} from {}",
                affected.len(),
                if affected.len() == 1 { "event" } else { "events" },
                file.display()
            )
            .green()
        );
    }

    Ok(())
}
