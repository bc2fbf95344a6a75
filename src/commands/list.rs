use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use schoolcal_core::date_range::DateRange;
use schoolcal_core::event::weekday_name;
use schoolcal_core::membership::sorted_by_start;
use schoolcal_core::state::Action;

use crate::commands::Session;
use crate::render;

pub fn run(session: &mut Session, range: Option<DateRange>) -> Result<()> {
    match range {
        Some(range) => run_search(session, range),
        None => run_agenda(session),
    }
}

/// Events overlapping `range`, sorted by start.
fn run_search(session: &mut Session, range: DateRange) -> Result<()> {
    session.apply(Action::SearchRange(range))?;
    session.print_header(&format!("Events {}", range));

    let visible = session.state.visible_events()?;
    if visible.is_empty() {
        println!("{}", "No events in this range".dimmed());
    }
    for event in visible {
        println!("{}", render::agenda_line(event));
    }

    session.print_footer();
    Ok(())
}

/// The whole calendar, past events dimmed and the patron day marked.
fn run_agenda(session: &mut Session) -> Result<()> {
    session.print_header("Agenda");

    let today = session.today();
    let mut patron_day = session.config.patron_day;

    for event in sorted_by_start(session.events()) {
        if let Some(day) = patron_day.filter(|d| *d <= event.start) {
            print_patron_day(day);
            patron_day = None;
        }

        let line = render::agenda_line(event);
        if event.end < today {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    if let Some(day) = patron_day {
        print_patron_day(day);
    }

    session.print_footer();
    Ok(())
}

fn print_patron_day(day: NaiveDate) {
    let line = format!(
        "{:<11} {:<10} ★ Patron day",
        day.format("%d/%m"),
        weekday_name(day.weekday())
    );
    println!("{}", line.red().bold());
}
