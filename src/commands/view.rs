use anyhow::Result;
use owo_colors::OwoColorize;
use schoolcal_core::date_range::ViewKind;
use schoolcal_core::state::Action;

use crate::commands::Session;
use crate::render::{self, GridView};

pub fn run(session: &mut Session, view: ViewKind, offset: i32) -> Result<()> {
    session.apply(Action::SetView(view))?;

    if offset != 0 {
        let target = view.shift(session.state.current_date, offset)?;
        session.apply(Action::GoTo(target))?;
    }

    let date = session.state.current_date;
    let viewport = session.state.viewport()?;
    session.print_header(&viewport.to_string());

    let grid = GridView {
        events: session.events(),
        patron_day: session.config.patron_day,
        today: session.today(),
    };

    let lines = match view {
        ViewKind::Month | ViewKind::Day => grid.month(date)?,
        ViewKind::Week => grid.week(date)?,
        ViewKind::Year => grid.year(date)?,
    };
    for line in lines {
        println!("{}", line);
    }

    // The year grid is dense enough on its own
    if view != ViewKind::Year {
        let visible = session.state.visible_events()?;
        println!();
        if visible.is_empty() {
            println!("{}", "No events".dimmed());
        }
        for event in visible {
            println!("{}", render::agenda_line(event));
        }
    }

    session.print_footer();
    Ok(())
}
