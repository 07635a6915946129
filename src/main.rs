//! # Tide Calendar Application Entry Point
//!
//! This binary loads a month of tides, applies any preset toggles and prints
//! the calendar, either as ASCII text or as a JSON view snapshot. With
//! `--interactive` it keeps reading commands from stdin and redraws after
//! each one.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tide_calendar_lib::config::{Config, CONFIG_FILE};
use tide_calendar_lib::input::{parse_input, Input, HELP};
use tide_calendar_lib::renderer::draw_ascii;
use tide_calendar_lib::tide_data::{StaticTideTable, TideSource};
use tide_calendar_lib::view::build_screen;
use tide_calendar_lib::viewer::{dispatch, ViewerModel, ViewerMsg};
use tide_calendar_lib::{HeightUnit, TimeFormat};

#[derive(Parser, Debug)]
#[command(
    name = "tide-calendar",
    version,
    about = "Calendrier des marées de La Rochelle"
)]
struct Cli {
    /// Month to display (1-12), defaults to the configured month
    #[arg(long)]
    month: Option<u32>,

    /// Year to display, defaults to the configured year
    #[arg(long)]
    year: Option<i32>,

    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Print the view snapshot as JSON instead of ASCII
    #[arg(long)]
    json: bool,

    /// Read commands from stdin and redraw after each one
    #[arg(long)]
    interactive: bool,

    /// Initial time format (12h or 24h)
    #[arg(long)]
    time_format: Option<TimeFormat>,

    /// Initial height unit (m or ft)
    #[arg(long)]
    unit: Option<HeightUnit>,

    /// Start with tide type labels hidden
    #[arg(long)]
    hide_types: bool,
}

/// Messages that move the default display options to the requested ones.
fn preset_messages(cli: &Cli) -> Vec<ViewerMsg> {
    let mut messages = Vec::new();
    if cli.time_format.is_some_and(|f| f != TimeFormat::default()) {
        messages.push(ViewerMsg::ToggleTimeFormat);
    }
    if cli.unit.is_some_and(|u| u != HeightUnit::default()) {
        messages.push(ViewerMsg::ToggleHeightUnit);
    }
    if cli.hide_types {
        messages.push(ViewerMsg::ToggleTideType);
    }
    messages
}

fn draw(model: &ViewerModel, json: bool) -> anyhow::Result<()> {
    let screen = build_screen(model);
    if json {
        let text = serde_json::to_string_pretty(&screen).context("serialize view")?;
        println!("{}", text);
    } else {
        draw_ascii(&screen);
    }
    Ok(())
}

fn run_interactive<S: TideSource>(
    rt: &tokio::runtime::Runtime,
    source: &S,
    mut model: ViewerModel,
    delay: Duration,
    json: bool,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    draw(&model, json)?;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_input(&line, &model) {
            Input::Message(msg) => {
                debug!("Dispatching {:?}", msg);
                model = rt.block_on(dispatch(source, &model, msg, delay));
                draw(&model, json)?;
            }
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Empty => {}
            Input::Invalid(reason) => println!("{} (h pour l'aide)", reason),
        }
    }

    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load_from_path(&cli.config);
    let month = cli.month.unwrap_or(config.viewer.month);
    let year = cli.year.unwrap_or(config.viewer.year);
    let delay = config.loading_delay();

    // Create Tokio runtime for the load step
    let rt = tokio::runtime::Runtime::new()?;
    let source = StaticTideTable::reference();

    info!("Opening tide calendar for {}/{}", month, year);
    let mut model = rt.block_on(dispatch(
        &source,
        &ViewerModel::new(month, year),
        ViewerMsg::Mount,
        delay,
    ));

    for msg in preset_messages(&cli) {
        model = rt.block_on(dispatch(&source, &model, msg, delay));
    }

    if cli.interactive {
        return run_interactive(&rt, &source, model, delay, cli.json);
    }

    draw(&model, cli.json)
}
