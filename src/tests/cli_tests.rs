//! # Command Line Tests
//!
//! Argument parsing and the preset toggles applied after the first load.

use crate::{preset_messages, Cli};
use clap::Parser;
use std::path::Path;
use tide_calendar_lib::config::CONFIG_FILE;
use tide_calendar_lib::viewer::ViewerMsg;
use tide_calendar_lib::{HeightUnit, TimeFormat};

#[test]
fn defaults_produce_no_presets() {
    let cli = Cli::parse_from(["tide-calendar"]);

    assert_eq!(cli.month, None);
    assert_eq!(cli.year, None);
    assert_eq!(cli.config, Path::new(CONFIG_FILE));
    assert!(!cli.json);
    assert!(!cli.interactive);
    assert!(preset_messages(&cli).is_empty());
}

#[test]
fn presets_toggle_only_what_differs() {
    let cli = Cli::parse_from([
        "tide-calendar",
        "--time-format",
        "12h",
        "--unit",
        "m",
        "--hide-types",
    ]);
    assert_eq!(cli.time_format, Some(TimeFormat::H12));
    assert_eq!(cli.unit, Some(HeightUnit::Meters));

    let messages = preset_messages(&cli);
    assert_eq!(messages.len(), 2);
    assert!(matches!(messages[0], ViewerMsg::ToggleTimeFormat));
    assert!(matches!(messages[1], ViewerMsg::ToggleTideType));
}

#[test]
fn period_arguments_parse() {
    let cli = Cli::parse_from(["tide-calendar", "--month", "13", "--year", "2025", "--json"]);
    assert_eq!(cli.month, Some(13));
    assert_eq!(cli.year, Some(2025));
    assert!(cli.json);
}

#[test]
fn config_path_can_be_overridden() {
    let cli = Cli::parse_from(["tide-calendar", "--config", "/etc/marees.toml"]);
    assert_eq!(cli.config, Path::new("/etc/marees.toml"));
}

#[test]
fn unknown_unit_is_rejected() {
    assert!(Cli::try_parse_from(["tide-calendar", "--unit", "yd"]).is_err());
}
