use anyhow::Result;
use schoolcal_core::upcoming::rank;

use crate::commands::Session;
use crate::render;

pub async fn run(session: &Session, watch: bool) -> Result<()> {
    if !watch {
        print_upcoming(session);
        return Ok(());
    }

    let mut interval = tokio::time::interval(session.config.tick_interval()?);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Clear screen and move the cursor home before redrawing
                print!("\x1b[2J\x1b[H");
                print_upcoming(session);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

fn print_upcoming(session: &Session) {
    let now = session.now();
    let upcoming = rank(session.events(), now, session.config.lookahead);

    session.print_header("Upcoming");
    println!("{}", render::upcoming(&upcoming, now.date()));
    session.print_footer();
}
