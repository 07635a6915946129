//! # Tide Table Data Source
//!
//! This module holds the compiled-in tide table and the lookup interface the
//! viewer loads from. There is no network and no cache: the table is a
//! static value, materialized into validated [`MonthTides`] on each lookup.
//!
//! ## Data Source
//!
//! ### La Rochelle tide table
//! - **Location**: La Rochelle, France
//! - **Period**: September 2025, days 1-10
//! - **Source**: the La Rochelle tourism office monthly tide page
//! - **Heights**: meters; tide type derived from height (≥ 4.0 m is high water)
//!
//! ### Materialization Pipeline
//! 1. **Match**: find the record for the requested (month, year)
//! 2. **Validate**: dates parse, weekday names and day numbers agree with the
//!    calendar, coefficients lie in 20-120, each day has 2-4 valid events
//! 3. **Build**: construct [`DayTides`] and [`TideEvent`] values
//!
//! ## Error Handling
//!
//! A missing (month, year) is not an error: lookups return `Ok(None)`.
//! A record that fails validation is a [`TideError`], which the viewer turns
//! into its error state.

use crate::format::weekday_abbrev;
use crate::{is_valid_coefficient, DayTides, MonthTides, TideEvent, TideTime};
use chrono::{Datelike, NaiveDate};
use log::debug;
use thiserror::Error;

/// Errors that can occur while materializing tide data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TideError {
    /// Event time is not `H:MM`/`HH:MM` within a 24 hour day
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// A day record contradicts the calendar or the coefficient scale
    #[error("invalid tide record {date}: {reason}")]
    InvalidRecord { date: String, reason: String },

    /// The lookup itself failed
    #[error("tide data load failed: {0}")]
    LoadFailure(String),
}

/// Lookup interface the viewer loads tide data through.
pub trait TideSource {
    /// Tides for a whole month, `Ok(None)` when the table has no such month.
    fn lookup_month(&self, month: u32, year: i32) -> Result<Option<MonthTides>, TideError>;

    /// Tides for one `YYYY-MM-DD` date, `Ok(None)` when unknown or malformed.
    fn lookup_day(&self, date: &str) -> Result<Option<DayTides>, TideError>;
}

/// Raw day row as printed in the tide table.
#[derive(Debug)]
pub struct DayRecord {
    pub date: &'static str,
    pub day_name: &'static str,
    pub day_number: u8,
    pub coefficient: u16,
    pub evening_coefficient: Option<u16>,
    /// `(time, height in meters)` in table order
    pub events: &'static [(&'static str, f64)],
}

/// Raw month of the tide table.
#[derive(Debug)]
pub struct MonthRecord {
    pub year: i32,
    pub month: u32,
    pub location: &'static str,
    pub days: &'static [DayRecord],
}

/// September 2025 for La Rochelle.
pub const SEPTEMBER_2025: MonthRecord = MonthRecord {
    year: 2025,
    month: 9,
    location: "La Rochelle, France",
    days: &[
        DayRecord {
            date: "2025-09-01",
            day_name: "LUN",
            day_number: 1,
            coefficient: 27,
            evening_coefficient: None,
            events: &[("05:05", 2.99), ("12:27", 4.53), ("17:42", 3.03)],
        },
        DayRecord {
            date: "2025-09-02",
            day_name: "MAR",
            day_number: 2,
            coefficient: 24,
            evening_coefficient: Some(24),
            events: &[
                ("06:21", 3.18),
                ("01:19", 4.39),
                ("19:11", 3.06),
                ("13:52", 4.69),
            ],
        },
        DayRecord {
            date: "2025-09-03",
            day_name: "MER",
            day_number: 3,
            coefficient: 25,
            evening_coefficient: None,
            events: &[
                ("07:38", 3.35),
                ("02:35", 4.41),
                ("20:18", 3.12),
                ("15:02", 4.78),
            ],
        },
        DayRecord {
            date: "2025-09-04",
            day_name: "JEU",
            day_number: 4,
            coefficient: 29,
            evening_coefficient: None,
            events: &[
                ("08:47", 3.48),
                ("03:42", 4.52),
                ("21:15", 3.22),
                ("16:05", 4.91),
            ],
        },
        DayRecord {
            date: "2025-09-05",
            day_name: "VEN",
            day_number: 5,
            coefficient: 35,
            evening_coefficient: None,
            events: &[
                ("09:48", 3.58),
                ("04:39", 4.67),
                ("22:05", 3.35),
                ("17:02", 5.07),
            ],
        },
        DayRecord {
            date: "2025-09-06",
            day_name: "SAM",
            day_number: 6,
            coefficient: 42,
            evening_coefficient: None,
            events: &[
                ("10:42", 3.65),
                ("05:31", 4.85),
                ("22:51", 3.51),
                ("17:54", 5.24),
            ],
        },
        DayRecord {
            date: "2025-09-07",
            day_name: "DIM",
            day_number: 7,
            coefficient: 49,
            evening_coefficient: None,
            events: &[
                ("11:32", 3.69),
                ("06:18", 5.05),
                ("23:34", 3.68),
                ("18:42", 5.42),
            ],
        },
        DayRecord {
            date: "2025-09-08",
            day_name: "LUN",
            day_number: 8,
            coefficient: 56,
            evening_coefficient: None,
            events: &[
                ("00:15", 3.86),
                ("07:02", 5.26),
                ("12:19", 3.71),
                ("19:28", 5.61),
            ],
        },
        DayRecord {
            date: "2025-09-09",
            day_name: "MAR",
            day_number: 9,
            coefficient: 63,
            evening_coefficient: None,
            events: &[
                ("00:54", 4.04),
                ("07:44", 5.47),
                ("13:04", 3.71),
                ("20:12", 5.79),
            ],
        },
        DayRecord {
            date: "2025-09-10",
            day_name: "MER",
            day_number: 10,
            coefficient: 69,
            evening_coefficient: None,
            events: &[
                ("01:32", 4.22),
                ("08:25", 5.68),
                ("13:47", 3.70),
                ("20:54", 5.96),
            ],
        },
    ],
};

const REFERENCE_MONTHS: &[MonthRecord] = &[SEPTEMBER_2025];

/// Immutable tide table over static month records.
#[derive(Debug, Clone, Copy)]
pub struct StaticTideTable {
    months: &'static [MonthRecord],
}

impl StaticTideTable {
    /// The demonstration table: September 2025 only.
    pub fn reference() -> Self {
        Self::from_records(REFERENCE_MONTHS)
    }

    pub fn from_records(months: &'static [MonthRecord]) -> Self {
        StaticTideTable { months }
    }

    fn record(&self, month: u32, year: i32) -> Option<&'static MonthRecord> {
        self.months
            .iter()
            .find(|record| record.month == month && record.year == year)
    }
}

impl TideSource for StaticTideTable {
    fn lookup_month(&self, month: u32, year: i32) -> Result<Option<MonthTides>, TideError> {
        match self.record(month, year) {
            Some(record) => materialize(record).map(Some),
            None => {
                debug!("No tide record for {}/{}", month, year);
                Ok(None)
            }
        }
    }

    fn lookup_day(&self, date: &str) -> Result<Option<DayTides>, TideError> {
        let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            debug!("Ignoring malformed date lookup '{}'", date);
            return Ok(None);
        };

        let Some(month) = self.lookup_month(parsed.month(), parsed.year())? else {
            return Ok(None);
        };

        Ok(month.days.into_iter().find(|day| day.date == date))
    }
}

// -- Private Implementation --

/// Validate a raw month and build its domain value.
fn materialize(record: &MonthRecord) -> Result<MonthTides, TideError> {
    if !(1..=12).contains(&record.month) {
        return Err(TideError::LoadFailure(format!(
            "month {} out of range for {}",
            record.month, record.location
        )));
    }

    let days = record
        .days
        .iter()
        .map(|day| materialize_day(record, day))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MonthTides {
        year: record.year,
        month: record.month,
        location: record.location.to_string(),
        days,
    })
}

fn materialize_day(month: &MonthRecord, day: &DayRecord) -> Result<DayTides, TideError> {
    let invalid = |reason: String| TideError::InvalidRecord {
        date: day.date.to_string(),
        reason,
    };

    let date = NaiveDate::parse_from_str(day.date, "%Y-%m-%d")
        .map_err(|e| invalid(format!("unparseable date ({e})")))?;

    if date.year() != month.year || date.month() != month.month {
        return Err(invalid(format!(
            "date outside {}/{}",
            month.month, month.year
        )));
    }
    if date.day() != day.day_number as u32 {
        return Err(invalid(format!("day number {} mismatch", day.day_number)));
    }

    let expected_name = weekday_abbrev(date.weekday());
    if day.day_name != expected_name {
        return Err(invalid(format!(
            "day name {} should be {}",
            day.day_name, expected_name
        )));
    }

    if !is_valid_coefficient(day.coefficient) {
        return Err(invalid(format!("coefficient {} out of range", day.coefficient)));
    }
    if let Some(evening) = day.evening_coefficient {
        if !is_valid_coefficient(evening) {
            return Err(invalid(format!("evening coefficient {evening} out of range")));
        }
    }

    if !(2..=4).contains(&day.events.len()) {
        return Err(invalid(format!("{} events, expected 2-4", day.events.len())));
    }

    let events = day
        .events
        .iter()
        .map(|&(time, height)| TideTime::parse(time).map(|t| TideEvent::new(t, height)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DayTides {
        date: day.date.to_string(),
        day_name: day.day_name.to_string(),
        day_number: day.day_number,
        coefficient: day.coefficient,
        evening_coefficient: day.evening_coefficient.into(),
        events,
    })
}
