mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use schoolcal_core::date_range::{DateRange, ViewKind, parse_date};
use tracing_subscriber::EnvFilter;

use crate::commands::Session;

#[derive(Parser)]
#[command(name = "schoolcal")]
#[command(about = "School academic calendar: browse the year, see what's next, and manage events")]
struct Cli {
    /// Reduced chrome for embedding (no header or footer)
    #[arg(long, global = true)]
    embed: bool,

    /// Reference date instead of today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Month grid around the reference date
    Month {
        /// Months to move forward (negative for back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Monday-to-Sunday week around the reference date
    Week {
        /// Weeks to move forward (negative for back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// All twelve months of the year
    Year {
        /// Years to move forward (negative for back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Every event on the reference date, in detail
    Day,
    /// Agenda of events, optionally restricted to a date range
    List {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Next event and the ones after it
    Upcoming {
        /// Keep refreshing until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Create an event (admin)
    New {
        title: Option<String>,

        /// First day (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// Last day (YYYY-MM-DD, defaults to start)
        #[arg(short, long)]
        end: Option<String>,

        /// academic, institutional, vacation, holiday, significant or ephemeris
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        participants: Option<String>,

        #[arg(long)]
        observations: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },
    /// Change an existing event (admin)
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(short = 't', long = "type")]
        event_type: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        participants: Option<String>,

        #[arg(long)]
        observations: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },
    /// Remove an event (admin)
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,

        #[arg(long)]
        password: Option<String>,
    },
    /// Bulk-import events from a JSON file (admin)
    Import {
        file: PathBuf,

        #[arg(long)]
        password: Option<String>,
    },
    /// Write every event to an .ics file
    Export { file: PathBuf },
    /// Turn day-before reminders on or off
    Notifications { toggle: Toggle },
    /// Deliver reminders for tomorrow's events
    Remind,
    /// Open the published calendar resolution
    Resolution,
    /// Show config paths and effective settings
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = Session::open(cli.date, cli.embed)?;

    match cli.command {
        Commands::Month { offset } => commands::view::run(&mut session, ViewKind::Month, offset),
        Commands::Week { offset } => commands::view::run(&mut session, ViewKind::Week, offset),
        Commands::Year { offset } => commands::view::run(&mut session, ViewKind::Year, offset),
        Commands::Day => commands::day::run(&mut session),
        Commands::List { from, to } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => Some(DateRange::from_args(&from, &to)?),
                _ => None,
            };
            commands::list::run(&mut session, range)
        }
        Commands::Upcoming { watch } => commands::upcoming::run(&session, watch).await,
        Commands::New {
            title,
            start,
            end,
            event_type,
            time,
            location,
            participants,
            observations,
            password,
        } => {
            session.login(password)?;
            let form = commands::EventForm {
                title,
                start,
                end,
                event_type,
                time,
                location,
                participants,
                observations,
            };
            commands::new::run(&mut session, form)
        }
        Commands::Edit {
            id,
            title,
            start,
            end,
            event_type,
            time,
            location,
            participants,
            observations,
            password,
        } => {
            session.login(password)?;
            let form = commands::EventForm {
                title,
                start,
                end,
                event_type,
                time,
                location,
                participants,
                observations,
            };
            commands::edit::run(&mut session, &id, form)
        }
        Commands::Delete { id, force, password } => {
            session.login(password)?;
            commands::delete::run(&mut session, &id, force)
        }
        Commands::Import { file, password } => {
            session.login(password)?;
            commands::import::run(&mut session, &file).await
        }
        Commands::Export { file } => commands::export::run(&session, &file),
        Commands::Notifications { toggle } => {
            commands::notifications::run(&session, matches!(toggle, Toggle::On))
        }
        Commands::Remind => commands::remind::run(&session),
        Commands::Resolution => commands::resolution::run(&session),
        Commands::Config => commands::config::run(&session),
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}
