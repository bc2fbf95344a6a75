use anyhow::Result;
use chrono::Datelike;
use owo_colors::OwoColorize;
use schoolcal_core::date_range::ViewKind;
use schoolcal_core::event::weekday_name;
use schoolcal_core::grid::DayCell;
use schoolcal_core::state::Action;

use crate::commands::Session;
use crate::render;

pub fn run(session: &mut Session) -> Result<()> {
    session.apply(Action::SetView(ViewKind::Day))?;

    let date = session.state.current_date;
    let viewport = session.state.viewport()?;
    let cell = DayCell::build(
        date,
        &viewport,
        session.events(),
        session.config.patron_day,
        session.today(),
    );

    session.print_header(&format!("{} {}", weekday_name(date.weekday()), date));

    if cell.is_patron_day {
        println!("{}\n", "Patron day (no classes)".red());
    }

    if cell.events.is_empty() {
        println!("{}", "No events".dimmed());
    }
    for (i, event) in cell.events.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", render::card(event));
    }

    session.print_footer();
    Ok(())
}
