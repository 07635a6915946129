//! # View Composition
//!
//! Builds an immutable snapshot of what the viewer shows: a [`Screen`] for
//! the current status, and for a loaded month the controls, the calendar
//! header, one [`DayCardView`] per day and the legend.
//!
//! Snapshots carry the final display strings plus semantic markers (tide
//! type, coefficient band, selection) so renderers and tests never repeat
//! the classification rules. All snapshot types serialize to JSON.

use crate::classify::{
    classify_coefficient, resolve_display_coefficients, sort_events_by_time, CoefficientBand,
};
use crate::format::{format_height, format_time, month_name, tide_type_label};
use crate::viewer::{ViewerModel, ViewerStatus};
use crate::{DayTides, MonthTides, TideDisplayOptions, TideEvent, TideType};
use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Chargement des données de marée...";
pub const NOT_FOUND_TITLE: &str = "Aucune donnée disponible";
pub const ERROR_TITLE: &str = "Erreur de chargement";
pub const ERROR_MESSAGE: &str = "Erreur lors du chargement des données de marée";
pub const RETRY_LABEL: &str = "Réessayer";

/// Everything shown for one viewer state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Loading {
        message: &'static str,
    },
    NotFound {
        title: &'static str,
        message: String,
    },
    Errored {
        title: &'static str,
        message: &'static str,
        retry_label: &'static str,
    },
    Calendar {
        controls: ControlsView,
        calendar: CalendarView,
    },
}

/// Labels of the three toggle buttons.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlsView {
    pub time_format: String,
    pub height_unit: String,
    pub tide_type: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalendarView {
    /// `Marées de {Month} {Year}`
    pub title: String,
    pub location: String,
    pub days: Vec<DayCardView>,
    pub legend: LegendView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayCardView {
    pub date: String,
    /// `{day_name} {day_number}`, e.g. `MAR 2`
    pub heading: String,
    pub selected: bool,
    /// One badge, or two when the evening coefficient differs
    pub badges: Vec<CoefficientBadge>,
    /// Description of the morning coefficient's band
    pub description: &'static str,
    /// Events in chronological order
    pub events: Vec<EventRowView>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CoefficientBadge {
    pub value: u16,
    pub band: CoefficientBand,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventRowView {
    pub time: String,
    pub height: String,
    pub tide_type: TideType,
    /// `Haute`/`Basse`, absent when tide types are hidden
    pub type_label: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendView {
    pub title: &'static str,
    pub tide_types_heading: &'static str,
    pub tide_types: Vec<LegendEntry>,
    pub coefficients_heading: &'static str,
    pub coefficients: Vec<LegendEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub class_name: &'static str,
}

/// Snapshot for the current viewer state.
pub fn build_screen(model: &ViewerModel) -> Screen {
    match &model.status {
        ViewerStatus::Loading => Screen::Loading {
            message: LOADING_MESSAGE,
        },
        ViewerStatus::NotFound => Screen::NotFound {
            title: NOT_FOUND_TITLE,
            message: format!("Aucune donnée disponible pour {}/{}", model.month, model.year),
        },
        ViewerStatus::Errored(_) => Screen::Errored {
            title: ERROR_TITLE,
            message: ERROR_MESSAGE,
            retry_label: RETRY_LABEL,
        },
        ViewerStatus::Loaded(month) => Screen::Calendar {
            controls: build_controls(&model.display_options),
            calendar: build_calendar(month, &model.display_options, model.selected_date.as_deref()),
        },
    }
}

pub fn build_controls(options: &TideDisplayOptions) -> ControlsView {
    ControlsView {
        time_format: format!("Format: {}", options.time_format),
        height_unit: format!("Unité: {}", options.height_unit),
        tide_type: if options.show_tide_type {
            "Masquer types"
        } else {
            "Afficher types"
        },
    }
}

pub fn build_calendar(
    month: &MonthTides,
    options: &TideDisplayOptions,
    selected_date: Option<&str>,
) -> CalendarView {
    let month_label = month_name(month.month)
        .map(str::to_string)
        .unwrap_or_else(|| month.month.to_string());

    CalendarView {
        title: format!("Marées de {} {}", month_label, month.year),
        location: month.location.clone(),
        days: month
            .days
            .iter()
            .map(|day| build_day_card(day, options, selected_date == Some(day.date.as_str())))
            .collect(),
        legend: build_legend(),
    }
}

pub fn build_day_card(day: &DayTides, options: &TideDisplayOptions, selected: bool) -> DayCardView {
    let badges = resolve_display_coefficients(day)
        .values()
        .into_iter()
        .map(|value| CoefficientBadge {
            value,
            band: CoefficientBand::from_coefficient(value),
        })
        .collect();

    DayCardView {
        date: day.date.clone(),
        heading: format!("{} {}", day.day_name, day.day_number),
        selected,
        badges,
        description: classify_coefficient(day.coefficient).description,
        events: sort_events_by_time(&day.events)
            .iter()
            .map(|event| build_event_row(event, options))
            .collect(),
    }
}

pub fn build_event_row(event: &TideEvent, options: &TideDisplayOptions) -> EventRowView {
    EventRowView {
        time: format_time(event.time(), options.time_format),
        height: format_height(event.height(), options.height_unit),
        tide_type: event.tide_type(),
        type_label: options
            .show_tide_type
            .then(|| tide_type_label(event.tide_type())),
    }
}

fn build_legend() -> LegendView {
    let band_entry = |label: &'static str, band: CoefficientBand| LegendEntry {
        label,
        class_name: band.class_name(),
    };

    LegendView {
        title: "Légende",
        tide_types_heading: "Types de marées",
        tide_types: vec![
            LegendEntry {
                label: "Marée haute (≥ 4.0m)",
                class_name: "tide-high",
            },
            LegendEntry {
                label: "Marée basse (< 4.0m)",
                class_name: "tide-low",
            },
        ],
        coefficients_heading: "Coefficients",
        coefficients: vec![
            band_entry("95+ Très fort", CoefficientBand::TresFort),
            band_entry("70-94 Fort", CoefficientBand::Fort),
            band_entry("45-69 Moyen", CoefficientBand::Moyen),
            band_entry("20-44 Faible", CoefficientBand::Faible),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EveningCoefficient, HeightUnit, TideTime, TimeFormat};

    fn mardi(evening: EveningCoefficient) -> DayTides {
        let event = |time: &str, height| TideEvent::new(TideTime::parse(time).unwrap(), height);
        DayTides {
            date: "2025-09-02".to_string(),
            day_name: "MAR".to_string(),
            day_number: 2,
            coefficient: 24,
            evening_coefficient: evening,
            events: vec![
                event("06:21", 3.18),
                event("01:19", 4.39),
                event("19:11", 3.06),
                event("13:52", 4.69),
            ],
        }
    }

    #[test]
    fn test_day_card_heading_and_description() {
        let card = build_day_card(
            &mardi(EveningCoefficient::Present(24)),
            &TideDisplayOptions::default(),
            false,
        );
        assert_eq!(card.heading, "MAR 2");
        assert_eq!(card.description, "Marées de morte-eau");
        assert!(!card.selected);
    }

    #[test]
    fn test_day_card_events_sorted() {
        let card = build_day_card(
            &mardi(EveningCoefficient::Absent),
            &TideDisplayOptions::default(),
            false,
        );
        let times: Vec<&str> = card.events.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, ["01:19", "06:21", "13:52", "19:11"]);
    }

    #[test]
    fn test_badges_follow_merge_rule() {
        let options = TideDisplayOptions::default();

        let same = build_day_card(&mardi(EveningCoefficient::Present(24)), &options, false);
        assert_eq!(
            same.badges,
            [CoefficientBadge {
                value: 24,
                band: CoefficientBand::Faible
            }]
        );

        let different = build_day_card(&mardi(EveningCoefficient::Present(30)), &options, false);
        let values: Vec<u16> = different.badges.iter().map(|b| b.value).collect();
        assert_eq!(values, [24, 30]);
    }

    #[test]
    fn test_strong_coefficient_badges() {
        let mut day = mardi(EveningCoefficient::Present(100));
        day.coefficient = 80;
        let card = build_day_card(&day, &TideDisplayOptions::default(), false);

        assert_eq!(
            card.badges,
            [
                CoefficientBadge {
                    value: 80,
                    band: CoefficientBand::Fort
                },
                CoefficientBadge {
                    value: 100,
                    band: CoefficientBand::TresFort
                }
            ]
        );
        assert_eq!(card.description, "Grandes marées");

        day.coefficient = 100;
        let card = build_day_card(&day, &TideDisplayOptions::default(), false);
        assert_eq!(card.badges.len(), 1);
        assert_eq!(card.description, "Grandes marées exceptionnelles");
    }

    #[test]
    fn test_event_row_formats_and_labels() {
        let event = TideEvent::new(TideTime::parse("12:27").unwrap(), 4.53);

        let row = build_event_row(&event, &TideDisplayOptions::default());
        assert_eq!(row.time, "12:27");
        assert_eq!(row.height, "4.53m");
        assert_eq!(row.tide_type, TideType::High);
        assert_eq!(row.type_label, Some("Haute"));

        let options = TideDisplayOptions {
            time_format: TimeFormat::H12,
            height_unit: HeightUnit::Feet,
            show_tide_type: false,
        };
        let row = build_event_row(&event, &options);
        assert_eq!(row.time, "12:27 PM");
        assert_eq!(row.height, "14.9ft");
        assert_eq!(row.tide_type, TideType::High);
        assert_eq!(row.type_label, None);
    }

    #[test]
    fn test_low_tide_label() {
        let event = TideEvent::new(TideTime::parse("17:42").unwrap(), 3.03);
        let row = build_event_row(&event, &TideDisplayOptions::default());
        assert_eq!(row.tide_type, TideType::Low);
        assert_eq!(row.type_label, Some("Basse"));
    }

    #[test]
    fn test_controls_labels() {
        let options = TideDisplayOptions::default();
        let controls = build_controls(&options);
        assert_eq!(controls.time_format, "Format: 24h");
        assert_eq!(controls.height_unit, "Unité: m");
        assert_eq!(controls.tide_type, "Masquer types");

        let controls = build_controls(&options.toggle_tide_type().toggle_time_format());
        assert_eq!(controls.time_format, "Format: 12h");
        assert_eq!(controls.tide_type, "Afficher types");
    }

    #[test]
    fn test_status_screens() {
        let loading = ViewerModel::new(9, 2025);
        assert_eq!(
            build_screen(&loading),
            Screen::Loading {
                message: "Chargement des données de marée..."
            }
        );

        let mut not_found = ViewerModel::new(13, 2025);
        not_found.status = ViewerStatus::NotFound;
        match build_screen(&not_found) {
            Screen::NotFound { message, .. } => {
                assert_eq!(message, "Aucune donnée disponible pour 13/2025")
            }
            other => panic!("unexpected screen {other:?}"),
        }

        let mut errored = ViewerModel::new(9, 2025);
        errored.status = ViewerStatus::Errored("boom".to_string());
        assert_eq!(
            build_screen(&errored),
            Screen::Errored {
                title: "Erreur de chargement",
                message: "Erreur lors du chargement des données de marée",
                retry_label: "Réessayer",
            }
        );
    }

    #[test]
    fn test_screen_json_shape() {
        let card = build_day_card(
            &mardi(EveningCoefficient::Present(30)),
            &TideDisplayOptions::default(),
            true,
        );
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["heading"], "MAR 2");
        assert_eq!(json["selected"], true);
        assert_eq!(json["badges"][1]["value"], 30);
        assert_eq!(json["badges"][0]["band"], "faible");
        assert_eq!(json["events"][0]["tide_type"], "high");

        let screen = build_screen(&ViewerModel::new(9, 2025));
        let json = serde_json::to_value(&screen).unwrap();
        assert_eq!(json["screen"], "loading");
    }
}
