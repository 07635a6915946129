//! Display formatting for times, heights and French labels.

use crate::{HeightUnit, TideTime, TideType, TimeFormat};
use chrono::Weekday;

/// Meters to feet conversion factor.
pub const FEET_PER_METER: f64 = 3.28084;

const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Format an event time for the chosen clock.
///
/// 24h passes the time through as `HH:MM`. 12h uses an unpadded hour, a
/// zero padded minute and an `AM`/`PM` suffix; midnight is `12:00 AM` and
/// noon is `12:00 PM`.
///
/// # Example
/// ```
/// use tide_calendar_lib::{format::format_time, TideTime, TimeFormat};
///
/// let t = TideTime::new(13, 52).unwrap();
/// assert_eq!(format_time(t, TimeFormat::H24), "13:52");
/// assert_eq!(format_time(t, TimeFormat::H12), "1:52 PM");
/// ```
pub fn format_time(time: TideTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::H24 => time.to_string(),
        TimeFormat::H12 => {
            let hours = time.hour();
            let period = if hours >= 12 { "PM" } else { "AM" };
            let display_hours = match hours {
                0 => 12,
                13..=23 => hours - 12,
                h => h,
            };
            format!("{}:{:02} {}", display_hours, time.minute(), period)
        }
    }
}

/// Format a height in meters for the chosen unit.
///
/// Meters keep two decimals, feet one: `4.53` gives `"4.53m"` or `"14.9ft"`.
/// Ties round away from zero, so `4.125` gives `"4.13m"`.
pub fn format_height(height: f64, unit: HeightUnit) -> String {
    match unit {
        HeightUnit::Meters => format!("{:.2}m", round_to(height, 2)),
        HeightUnit::Feet => format!("{:.1}ft", round_to(height * FEET_PER_METER, 1)),
    }
}

// `{:.N}` alone rounds exact ties to even.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Localized tide type label.
pub fn tide_type_label(tide_type: TideType) -> &'static str {
    match tide_type {
        TideType::High => "Haute",
        TideType::Low => "Basse",
    }
}

/// French month name for 1-12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = month.checked_sub(1)? as usize;
    MONTH_NAMES.get(index).copied()
}

/// Three letter French weekday abbreviation as printed in tide tables.
pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "LUN",
        Weekday::Tue => "MAR",
        Weekday::Wed => "MER",
        Weekday::Thu => "JEU",
        Weekday::Fri => "VEN",
        Weekday::Sat => "SAM",
        Weekday::Sun => "DIM",
    }
}
