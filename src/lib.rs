//! # Tide Calendar Core Library
//!
//! This library provides the data structures, classification rules and view
//! composition for the tide calendar: a month of tide events for one coastal
//! location, displayed day by day with French labels.
//!
//! ## Design Philosophy
//!
//! ### Pure Core
//! - **No I/O in the core**: classification, formatting and view building are
//!   plain functions over immutable values
//! - **Explicit state machine**: the viewer is driven by messages through
//!   [`viewer::update`], which returns a fresh model and a command for the
//!   runtime to execute
//! - **Injected data**: the tide table is a value behind the
//!   [`tide_data::TideSource`] trait, not a global
//!
//! ### Data Flow
//! 1. **Lookup**: [`tide_data::StaticTideTable`] materializes a validated [`MonthTides`]
//! 2. **State**: [`viewer::ViewerModel`] holds the status, preferences and selection
//! 3. **View**: [`view::build_screen`] turns the model into a serializable snapshot
//! 4. **Draw**: [`renderer::draw_ascii`] prints the snapshot to the terminal
//!
//! ## Core Types
//! - [`TideEvent`]: a single high or low water with time and height
//! - [`DayTides`]: all events and coefficients for one calendar day
//! - [`MonthTides`]: one month of days for one location
//! - [`TideDisplayOptions`]: the three user toggles

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod classify;
pub mod config;
pub mod format;
pub mod input;
pub mod renderer;
pub mod tide_data;
pub mod view;
pub mod viewer;

use crate::tide_data::TideError;

/// Lowest valid tide coefficient.
pub const MIN_COEFFICIENT: u16 = 20;
/// Highest valid tide coefficient.
pub const MAX_COEFFICIENT: u16 = 120;

/// Whether a tide event is a high or a low water.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideType {
    High,
    Low,
}

/// A validated time of day in `HH:MM` form.
///
/// Parsing accepts a one or two digit hour and a two digit minute, so both
/// `"7:05"` and `"07:05"` are valid. Display is always zero padded.
///
/// # Example
/// ```
/// use tide_calendar_lib::TideTime;
///
/// let t: TideTime = "7:05".parse().unwrap();
/// assert_eq!(t.to_string(), "07:05");
/// assert_eq!(t.minutes_of_day(), 425);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TideTime {
    hour: u8,
    minute: u8,
}

impl TideTime {
    /// Build a time from its parts, `None` when out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(TideTime { hour, minute })
    }

    /// Parse an `H:MM` or `HH:MM` string.
    pub fn parse(text: &str) -> Result<Self, TideError> {
        let invalid = || TideError::InvalidTime(text.to_string());

        let (hours, minutes) = text.split_once(':').ok_or_else(invalid)?;
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&hours.len()) || minutes.len() != 2 {
            return Err(invalid());
        }
        if !all_digits(hours) || !all_digits(minutes) {
            return Err(invalid());
        }

        let hour: u8 = hours.parse().map_err(|_| invalid())?;
        let minute: u8 = minutes.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Sort key used to order events within a day.
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl FromStr for TideTime {
    type Err = TideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TideTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TideTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single high- or low-water occurrence.
///
/// The tide type is derived from the height at construction and cannot be
/// set independently: `High` iff `height >= 4.0` meters.
///
/// # Example
/// ```
/// use tide_calendar_lib::{TideEvent, TideTime, TideType};
///
/// let time = TideTime::new(12, 27).unwrap();
/// let event = TideEvent::new(time, 4.53);
/// assert_eq!(event.tide_type(), TideType::High);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TideEvent {
    time: TideTime,
    /// Water height in meters
    height: f64,
    #[serde(rename = "type")]
    tide_type: TideType,
}

impl TideEvent {
    pub fn new(time: TideTime, height: f64) -> Self {
        TideEvent {
            time,
            height,
            tide_type: classify::classify_tide(height),
        }
    }

    pub fn time(&self) -> TideTime {
        self.time
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn tide_type(&self) -> TideType {
        self.tide_type
    }
}

/// Second coefficient reading of the day, when the tide table reports one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum EveningCoefficient {
    #[default]
    Absent,
    Present(u16),
}

impl EveningCoefficient {
    pub fn value(&self) -> Option<u16> {
        match self {
            EveningCoefficient::Absent => None,
            EveningCoefficient::Present(value) => Some(*value),
        }
    }
}

impl From<Option<u16>> for EveningCoefficient {
    fn from(value: Option<u16>) -> Self {
        value.map_or(EveningCoefficient::Absent, EveningCoefficient::Present)
    }
}

/// Tides for one calendar day.
///
/// `events` holds 2 to 4 entries and is not necessarily chronological; use
/// [`classify::sort_events_by_time`] before display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayTides {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    /// French weekday abbreviation (LUN, MAR, MER, JEU, VEN, SAM, DIM)
    pub day_name: String,
    /// Day of month (1-31)
    pub day_number: u8,
    /// Morning coefficient (20-120)
    pub coefficient: u16,
    pub evening_coefficient: EveningCoefficient,
    pub events: Vec<TideEvent>,
}

/// One month of tide data for a single location.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthTides {
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    pub location: String,
    pub days: Vec<DayTides>,
}

impl MonthTides {
    pub fn day(&self, date: &str) -> Option<&DayTides> {
        self.days.iter().find(|day| day.date == date)
    }
}

/// Clock used to display event times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    H12,
    #[default]
    #[serde(rename = "24h")]
    H24,
}

impl TimeFormat {
    pub fn toggled(self) -> Self {
        match self {
            TimeFormat::H12 => TimeFormat::H24,
            TimeFormat::H24 => TimeFormat::H12,
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::H12 => write!(f, "12h"),
            TimeFormat::H24 => write!(f, "24h"),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12h" => Ok(TimeFormat::H12),
            "24h" => Ok(TimeFormat::H24),
            other => Err(format!("unknown time format '{other}' (expected 12h or 24h)")),
        }
    }
}

/// Unit used to display water heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "ft")]
    Feet,
}

impl HeightUnit {
    pub fn toggled(self) -> Self {
        match self {
            HeightUnit::Meters => HeightUnit::Feet,
            HeightUnit::Feet => HeightUnit::Meters,
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightUnit::Meters => write!(f, "m"),
            HeightUnit::Feet => write!(f, "ft"),
        }
    }
}

impl FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(HeightUnit::Meters),
            "ft" => Ok(HeightUnit::Feet),
            other => Err(format!("unknown height unit '{other}' (expected m or ft)")),
        }
    }
}

/// User display preferences. Not persisted; defaults to `{24h, m, true}`.
///
/// Each toggle returns a new value and touches exactly one field.
///
/// # Example
/// ```
/// use tide_calendar_lib::{TideDisplayOptions, TimeFormat};
///
/// let options = TideDisplayOptions::default();
/// let flipped = options.toggle_time_format();
/// assert_eq!(flipped.time_format, TimeFormat::H12);
/// assert_eq!(flipped.toggle_time_format(), options);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TideDisplayOptions {
    pub time_format: TimeFormat,
    pub height_unit: HeightUnit,
    pub show_tide_type: bool,
}

impl Default for TideDisplayOptions {
    fn default() -> Self {
        TideDisplayOptions {
            time_format: TimeFormat::H24,
            height_unit: HeightUnit::Meters,
            show_tide_type: true,
        }
    }
}

impl TideDisplayOptions {
    pub fn toggle_time_format(self) -> Self {
        TideDisplayOptions {
            time_format: self.time_format.toggled(),
            ..self
        }
    }

    pub fn toggle_height_unit(self) -> Self {
        TideDisplayOptions {
            height_unit: self.height_unit.toggled(),
            ..self
        }
    }

    pub fn toggle_tide_type(self) -> Self {
        TideDisplayOptions {
            show_tide_type: !self.show_tide_type,
            ..self
        }
    }
}

/// True for `H:MM` / `HH:MM` strings within a 24 hour day.
pub fn is_valid_time_format(time: &str) -> bool {
    TideTime::parse(time).is_ok()
}

/// True for coefficients within the published 20-120 scale.
pub fn is_valid_coefficient(coefficient: u16) -> bool {
    (MIN_COEFFICIENT..=MAX_COEFFICIENT).contains(&coefficient)
}
