//! # Tide Calendar Rendering
//!
//! This module draws a [`Screen`] snapshot as plain text for the terminal.
//! Layout follows the calendar page: toggle buttons, the month header, one
//! boxed card per day and the legend at the bottom.
//!
//! Tide type is always visible through the row marker (`▲` high, `▼` low),
//! even when the `Haute`/`Basse` labels are hidden. The selected day is drawn
//! with a double border.

use crate::view::{CalendarView, ControlsView, DayCardView, EventRowView, LegendView, Screen};
use crate::TideType;
use std::fmt::{self, Formatter};

/// Inner width of a day card, between the side borders.
const CARD_WIDTH: usize = 44;

/// Text rendering of a screen, written through [`fmt::Display`].
struct Ascii<'a>(&'a Screen);

impl fmt::Display for Ascii<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Screen::Loading { message } => writeln!(f, "⏳ {}", message),
            Screen::NotFound { title, message } => {
                writeln!(f, "📅 {}", title)?;
                writeln!(f, "{}", message)
            }
            Screen::Errored {
                title,
                message,
                retry_label,
            } => {
                writeln!(f, "⚠ {}", title)?;
                writeln!(f, "{}", message)?;
                writeln!(f, "[{}]", retry_label)
            }
            Screen::Calendar { controls, calendar } => {
                render_controls(f, controls)?;
                writeln!(f)?;
                render_calendar(f, calendar)
            }
        }
    }
}

/// Render a screen to a string.
pub fn render_ascii(screen: &Screen) -> String {
    Ascii(screen).to_string()
}

/// Render a screen to stdout.
pub fn draw_ascii(screen: &Screen) {
    print!("{}", Ascii(screen));
}

fn render_controls(f: &mut Formatter<'_>, controls: &ControlsView) -> fmt::Result {
    writeln!(
        f,
        "[{}]  [{}]  [{}]",
        controls.time_format, controls.height_unit, controls.tide_type
    )
}

fn render_calendar(f: &mut Formatter<'_>, calendar: &CalendarView) -> fmt::Result {
    writeln!(f, "{}", calendar.title)?;
    writeln!(f, "{}", calendar.location)?;
    writeln!(f, "{}", "=".repeat(calendar.title.chars().count()))?;
    writeln!(f)?;

    for card in &calendar.days {
        render_day_card(f, card)?;
    }

    render_legend(f, &calendar.legend)
}

fn render_day_card(f: &mut Formatter<'_>, card: &DayCardView) -> fmt::Result {
    let (edge, side) = if card.selected { ('=', '‖') } else { ('-', '|') };
    let border = format!("+{}+", edge.to_string().repeat(CARD_WIDTH + 2));

    let badges = card
        .badges
        .iter()
        .map(|badge| format!("[{} {}]", badge.value, badge.band.label()))
        .collect::<Vec<_>>()
        .join(" ");
    let heading = if card.selected {
        format!("▶ {}", card.heading)
    } else {
        card.heading.clone()
    };
    let gap = CARD_WIDTH.saturating_sub(heading.chars().count() + badges.chars().count());
    let header = format!("{}{}{}", heading, " ".repeat(gap), badges);

    writeln!(f, "{}", border)?;
    card_line(f, side, &header)?;
    card_line(f, side, card.description)?;
    for event in &card.events {
        card_line(f, side, &event_line(event))?;
    }
    writeln!(f, "{}", border)
}

fn event_line(event: &EventRowView) -> String {
    let marker = match event.tide_type {
        TideType::High => '▲',
        TideType::Low => '▼',
    };
    let line = format!("  {} {:<8}  {:>7}", marker, event.time, event.height);
    match event.type_label {
        Some(label) => format!("{}  {}", line, label),
        None => line,
    }
}

fn card_line(f: &mut Formatter<'_>, side: char, content: &str) -> fmt::Result {
    writeln!(f, "{} {:<width$} {}", side, content, side, width = CARD_WIDTH)
}

fn render_legend(f: &mut Formatter<'_>, legend: &LegendView) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", legend.title)?;
    writeln!(f, "  {}", legend.tide_types_heading)?;
    for (marker, entry) in ['▲', '▼'].iter().zip(&legend.tide_types) {
        writeln!(f, "    {} {}", marker, entry.label)?;
    }
    writeln!(f, "  {}", legend.coefficients_heading)?;
    for entry in &legend.coefficients {
        writeln!(f, "    {}", entry.label)?;
    }
    Ok(())
}
