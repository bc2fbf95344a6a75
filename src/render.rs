//! Terminal rendering for schoolcal types.
//!
//! Extension traits and helpers that turn schoolcal-core types into colored
//! terminal output using owo_colors. Grid cells are padded before they are
//! colored so escape codes never break column alignment.

use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use schoolcal_core::CalendarResult;
use schoolcal_core::date_range::DateRange;
use schoolcal_core::event::{CalendarEvent, EventType, weekday_name};
use schoolcal_core::grid::{self, DayCell};
use schoolcal_core::upcoming::{Upcoming, days_until};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to the event type
pub fn paint(kind: EventType, text: &str) -> String {
    match kind {
        EventType::Academic => text.blue().to_string(),
        EventType::Institutional => text.cyan().to_string(),
        EventType::Vacation => text.green().to_string(),
        EventType::Holiday => text.red().to_string(),
        EventType::Significant => text.magenta().to_string(),
        EventType::Ephemeris => text.yellow().to_string(),
    }
}

impl Render for EventType {
    fn render(&self) -> String {
        format!("{} {}", paint(*self, "●"), self.label())
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let time = self.time.as_deref().unwrap_or("");
        format!("{} {} {}", paint(self.event_type, "●"), self.title, time.dimmed())
    }
}

/// Width of one day cell in the month and year grids
const CELL_WIDTH: usize = 4;
const GRID_WIDTH: usize = CELL_WIDTH * 7;
/// Title, weekday header and up to six week rows
const MONTH_BLOCK_LINES: usize = 8;

/// Everything a grid needs besides the date it shows.
pub struct GridView<'a> {
    pub events: &'a [CalendarEvent],
    pub patron_day: Option<NaiveDate>,
    pub today: NaiveDate,
}

impl<'a> GridView<'a> {
    fn cells(&self, days: &[NaiveDate], focus: &DateRange) -> Vec<DayCell<'a>> {
        grid::cells(days, focus, self.events, self.patron_day, self.today)
    }

    /// Month grid as fixed-width lines.
    pub fn month(&self, date: NaiveDate) -> CalendarResult<Vec<String>> {
        let focus = DateRange::month(date)?;
        let days = grid::month_grid(date)?;
        let cells = self.cells(&days, &focus);

        let title = format!("{:^width$}", date.format("%B %Y").to_string(), width = GRID_WIDTH);
        let header: String = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
            .iter()
            .map(|d| format!("{:>3} ", d))
            .collect();

        let mut lines = vec![title.bold().to_string(), header.dimmed().to_string()];
        for week in cells.chunks(7) {
            lines.push(week.iter().map(render_cell).collect());
        }
        Ok(lines)
    }

    /// Twelve month blocks, three per row.
    pub fn year(&self, date: NaiveDate) -> CalendarResult<Vec<String>> {
        let blocks = grid::year_months(date)?
            .into_iter()
            .map(|first| {
                let mut block = self.month(first)?;
                block.resize(MONTH_BLOCK_LINES, " ".repeat(GRID_WIDTH));
                Ok(block)
            })
            .collect::<CalendarResult<Vec<Vec<String>>>>()?;

        let mut lines = Vec::new();
        for row in blocks.chunks(3) {
            for i in 0..MONTH_BLOCK_LINES {
                let line: Vec<&str> = row.iter().map(|block| block[i].as_str()).collect();
                lines.push(line.join("  "));
            }
        }
        Ok(lines)
    }

    /// One line per weekday with that day's events.
    pub fn week(&self, date: NaiveDate) -> CalendarResult<Vec<String>> {
        let focus = DateRange::iso_week(date)?;
        let days = grid::week_days(date)?;

        let lines = self
            .cells(&days, &focus)
            .iter()
            .map(|cell| {
                let label = format!(
                    "{:<10} {}",
                    weekday_name(cell.date.weekday()),
                    cell.date.format("%d/%m")
                );
                let label = style_day_label(cell, &label);

                let events = if cell.events.is_empty() {
                    let note = if cell.is_patron_day { "Patron day" } else { "-" };
                    note.dimmed().to_string()
                } else {
                    cell.events
                        .iter()
                        .map(|e| e.render())
                        .collect::<Vec<_>>()
                        .join("  ")
                };

                format!("{}  {}", label, events)
            })
            .collect();
        Ok(lines)
    }
}

fn render_cell(cell: &DayCell) -> String {
    let number = format!("{:>3}", cell.date.day());
    let number = if !cell.in_focus {
        number.dimmed().to_string()
    } else {
        style_day_label(cell, &number)
    };

    let marker = match cell.summary_kinds().first() {
        Some(kind) if cell.in_focus => paint(*kind, "•"),
        _ => " ".to_string(),
    };

    format!("{}{}", number, marker)
}

fn style_day_label(cell: &DayCell, text: &str) -> String {
    if cell.is_today {
        text.reversed().to_string()
    } else if cell.is_non_working() {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

/// Compact date span, e.g. "02/02" or "29/06-17/07"
pub fn span_label(event: &CalendarEvent) -> String {
    if event.is_single_day() {
        event.start.format("%d/%m").to_string()
    } else {
        format!("{}-{}", event.start.format("%d/%m"), event.end.format("%d/%m"))
    }
}

/// One agenda line: span, weekday, title, time.
pub fn agenda_line(event: &CalendarEvent) -> String {
    format!("{:<11} {:<10} {}", span_label(event), event.day(), event.render())
}

/// Full detail block for a single event.
pub fn card(event: &CalendarEvent) -> String {
    let mut lines = vec![format!(
        "{} {}  {}",
        paint(event.event_type, "●"),
        event.title.bold(),
        format!("[{}]", event.event_type.label()).dimmed()
    )];

    let dates = if event.is_single_day() {
        format!("{} {}", event.day(), event.start)
    } else {
        format!("{} {} to {}", event.day(), event.start, event.end)
    };
    lines.push(format!("   {}", dates));

    let details = [
        ("Time", event.time.as_deref()),
        ("Location", event.location.as_deref()),
        ("Participants", event.participants.as_deref()),
        ("Notes", event.notes()),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            lines.push(format!("   {} {}", format!("{label}:").dimmed(), value));
        }
    }

    lines.push(format!("   {}", format!("id: {}", event.id).dimmed()));
    lines.join("\n")
}

/// "Today", "Tomorrow" or "In N days"
pub fn countdown(event: &CalendarEvent, today: NaiveDate) -> String {
    match days_until(event, today) {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("In {} days", n),
    }
}

/// Featured event block followed by the lookahead list.
pub fn upcoming(upcoming: &Upcoming, today: NaiveDate) -> String {
    let Some(featured) = upcoming.featured else {
        return "No upcoming events".dimmed().to_string();
    };

    let mut lines = vec![
        "Next event".bold().to_string(),
        format!("   {}", featured.render()),
        format!(
            "   {} {}",
            countdown(featured, today).green(),
            format!("{} {}", featured.day(), featured.start).dimmed()
        ),
    ];
    if let Some(ref location) = featured.location {
        lines.push(format!("   {}", location.dimmed()));
    }

    if !upcoming.lookahead.is_empty() {
        lines.push(String::new());
        lines.push("Coming up".bold().to_string());
        for event in &upcoming.lookahead {
            lines.push(format!("   {}", agenda_line(event)));
        }
    }

    lines.join("\n")
}

/// Event type legend
pub fn legend() -> String {
    EventType::ALL
        .iter()
        .map(|t| t.render())
        .collect::<Vec<_>>()
        .join("  ")
}

/// Title line and legend around a view. Both are dropped when embedded.
pub struct Chrome<'a> {
    pub institution: &'a str,
    pub embed: bool,
}

impl Chrome<'_> {
    pub fn header(&self, subtitle: &str) -> Option<String> {
        (!self.embed).then(|| format!("{} {}", self.institution.bold(), subtitle.dimmed()))
    }

    pub fn footer(&self) -> Option<String> {
        (!self.embed).then(legend)
    }
}
