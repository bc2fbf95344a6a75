use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use schoolcal_core::date_range::parse_date;
use schoolcal_core::event::EventType;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

pub fn create_progress(len: u64, message: String) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:30}] {pos}/{len}")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_message(message);
    bar
}

/// Prompt the user with retry on parse errors.
pub fn prompt_with_retry<T, F>(prompt: &str, default: Option<String>, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(ref default) = default {
            input = input.default(default.clone());
        }
        let input = input.interact_text()?;

        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

pub fn prompt_date(prompt: &str, default: Option<NaiveDate>) -> Result<NaiveDate> {
    prompt_with_retry(prompt, default.map(|d| d.to_string()), |s| Ok(parse_date(s)?))
}

pub fn prompt_type(default: EventType) -> Result<EventType> {
    let labels: Vec<&str> = EventType::ALL.iter().map(|t| t.label()).collect();
    let current = EventType::ALL.iter().position(|t| *t == default).unwrap_or(0);

    let index = Select::new()
        .with_prompt("  Type")
        .items(&labels)
        .default(current)
        .interact()?;

    Ok(EventType::ALL[index])
}

/// Free-text prompt that may be left empty.
pub fn prompt_optional(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.unwrap_or_default().to_string())
        .show_default(default.is_some())
        .allow_empty(true)
        .interact_text()?;

    Ok(if value.trim().is_empty() { None } else { Some(value) })
}
