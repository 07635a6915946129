//! # Tide Classification
//!
//! Pure rules that turn raw tide numbers into display categories:
//!
//! - **Tide type**: high water at or above 4.0 m, low water below
//! - **Coefficient band**: four fixed bands with inclusive lower bounds
//! - **Event order**: events sorted by time of day, stable on ties
//! - **Coefficient merge**: the evening reading is shown only when it differs
//!
//! Every function here is total. Coefficients outside the published 20-120
//! scale clamp to the nearest band: below 20 is `Faible`, above 120 is
//! `Très fort`.

use crate::{DayTides, TideEvent, TideType};
use serde::Serialize;

/// Height in meters at and above which an event is high water.
pub const HIGH_TIDE_THRESHOLD_M: f64 = 4.0;

/// Classify an event from its height.
pub fn classify_tide(height: f64) -> TideType {
    if height >= HIGH_TIDE_THRESHOLD_M {
        TideType::High
    } else {
        TideType::Low
    }
}

/// Severity band of a tide coefficient.
///
/// | range  | band     |
/// |--------|----------|
/// | ≥95    | TresFort |
/// | 70–94  | Fort     |
/// | 45–69  | Moyen    |
/// | 20–44  | Faible   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoefficientBand {
    Faible,
    Moyen,
    Fort,
    TresFort,
}

impl CoefficientBand {
    pub fn from_coefficient(coefficient: u16) -> Self {
        if coefficient >= 95 {
            CoefficientBand::TresFort
        } else if coefficient >= 70 {
            CoefficientBand::Fort
        } else if coefficient >= 45 {
            CoefficientBand::Moyen
        } else {
            CoefficientBand::Faible
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoefficientBand::TresFort => "Très fort",
            CoefficientBand::Fort => "Fort",
            CoefficientBand::Moyen => "Moyen",
            CoefficientBand::Faible => "Faible",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CoefficientBand::TresFort => "Grandes marées exceptionnelles",
            CoefficientBand::Fort => "Grandes marées",
            CoefficientBand::Moyen => "Marées moyennes",
            CoefficientBand::Faible => "Marées de morte-eau",
        }
    }

    /// Stable class name for styling hooks.
    pub fn class_name(&self) -> &'static str {
        match self {
            CoefficientBand::TresFort => "coef-tres-fort",
            CoefficientBand::Fort => "coef-fort",
            CoefficientBand::Moyen => "coef-moyen",
            CoefficientBand::Faible => "coef-faible",
        }
    }
}

/// Descriptor for a coefficient: label, band and description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CoefficientInfo {
    pub label: &'static str,
    pub band: CoefficientBand,
    pub description: &'static str,
}

/// Map a coefficient to its band descriptor.
///
/// # Example
/// ```
/// use tide_calendar_lib::classify::{classify_coefficient, CoefficientBand};
///
/// let info = classify_coefficient(69);
/// assert_eq!(info.label, "Moyen");
/// assert_eq!(info.band, CoefficientBand::Moyen);
/// assert_eq!(classify_coefficient(70).label, "Fort");
/// ```
pub fn classify_coefficient(coefficient: u16) -> CoefficientInfo {
    let band = CoefficientBand::from_coefficient(coefficient);
    CoefficientInfo {
        label: band.label(),
        band,
        description: band.description(),
    }
}

/// Return the events in chronological order without touching the input.
///
/// `sort_by_key` is stable, so events at identical times keep their
/// original relative order.
pub fn sort_events_by_time(events: &[TideEvent]) -> Vec<TideEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.time().minutes_of_day());
    sorted
}

/// Coefficients to show as badges for one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayCoefficients {
    pub morning: u16,
    pub evening: Option<u16>,
}

impl DisplayCoefficients {
    /// Badge values in display order: morning, then evening if any.
    pub fn values(&self) -> Vec<u16> {
        std::iter::once(self.morning).chain(self.evening).collect()
    }
}

/// Apply the merge rule: an evening coefficient equal to the morning one is
/// redundant and suppressed.
pub fn resolve_display_coefficients(day: &DayTides) -> DisplayCoefficients {
    let evening = day
        .evening_coefficient
        .value()
        .filter(|evening| *evening != day.coefficient);

    DisplayCoefficients {
        morning: day.coefficient,
        evening,
    }
}
