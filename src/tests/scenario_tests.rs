//! # End-to-End Viewer Scenarios
//!
//! These tests drive the viewer the way a user does: mount for a period,
//! click toggles and day cards, and check what the calendar shows. They go
//! through `update`/`dispatch` and `build_screen` only, no terminal needed.

use std::time::Duration;
use tide_calendar_lib::classify::CoefficientBand;
use tide_calendar_lib::renderer::render_ascii;
use tide_calendar_lib::tide_data::{StaticTideTable, TideError, TideSource};
use tide_calendar_lib::view::{build_screen, CalendarView, Screen};
use tide_calendar_lib::viewer::{dispatch, update, ViewerModel, ViewerMsg, ViewerStatus};
use tide_calendar_lib::{DayTides, HeightUnit, MonthTides, TideType, TimeFormat};

/// Source whose lookups always fail, to reach the error screen.
struct BrokenTable;

impl TideSource for BrokenTable {
    fn lookup_month(&self, _: u32, _: i32) -> Result<Option<MonthTides>, TideError> {
        Err(TideError::LoadFailure("table corrupted".to_string()))
    }

    fn lookup_day(&self, _: &str) -> Result<Option<DayTides>, TideError> {
        Err(TideError::LoadFailure("table corrupted".to_string()))
    }
}

fn open(month: u32, year: i32) -> ViewerModel {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("Should build runtime");
    rt.block_on(dispatch(
        &StaticTideTable::reference(),
        &ViewerModel::new(month, year),
        ViewerMsg::Mount,
        Duration::ZERO,
    ))
}

fn send(model: &ViewerModel, msg: ViewerMsg) -> ViewerModel {
    update(model, msg).0
}

fn calendar(model: &ViewerModel) -> CalendarView {
    match build_screen(model) {
        Screen::Calendar { calendar, .. } => calendar,
        other => panic!("Expected the calendar, got {:?}", other),
    }
}

fn selected_headings(model: &ViewerModel) -> Vec<String> {
    calendar(model)
        .days
        .into_iter()
        .filter(|card| card.selected)
        .map(|card| card.heading)
        .collect()
}

/// Requesting September 2025 shows the La Rochelle calendar.
#[test]
fn september_2025_loads_calendar() {
    let model = open(9, 2025);
    let view = calendar(&model);

    assert_eq!(view.title, "Marées de Septembre 2025");
    assert_eq!(view.location, "La Rochelle, France");
    assert!(
        view.days.len() >= 10,
        "Expected at least 10 days, got {}",
        view.days.len()
    );
    assert_eq!(view.days[0].heading, "LUN 1");
}

/// Requesting a month outside the table shows the not-found message.
#[test]
fn unknown_month_shows_not_found() {
    let model = open(13, 2025);

    assert_eq!(model.status, ViewerStatus::NotFound);
    match build_screen(&model) {
        Screen::NotFound { message, .. } => {
            assert_eq!(message, "Aucune donnée disponible pour 13/2025")
        }
        other => panic!("Expected not-found screen, got {:?}", other),
    }
}

/// A failing lookup lands on the error screen, and retry reloads.
#[tokio::test]
async fn load_failure_offers_retry() {
    let model = dispatch(
        &BrokenTable,
        &ViewerModel::new(9, 2025),
        ViewerMsg::Mount,
        Duration::ZERO,
    )
    .await;

    let text = render_ascii(&build_screen(&model));
    assert!(text.contains("Erreur lors du chargement des données de marée"));
    assert!(text.contains("Réessayer"));

    let retried = dispatch(
        &StaticTideTable::reference(),
        &model,
        ViewerMsg::Retry,
        Duration::ZERO,
    )
    .await;
    assert_eq!(calendar(&retried).title, "Marées de Septembre 2025");
}

/// Day 2 reports the same coefficient twice: exactly one badge.
#[test]
fn equal_coefficients_render_one_badge() {
    let view = calendar(&open(9, 2025));
    let mardi = view
        .days
        .iter()
        .find(|card| card.heading == "MAR 2")
        .expect("MAR 2 should be present");

    assert_eq!(mardi.badges.len(), 1);
    assert_eq!(mardi.badges[0].value, 24);
    assert_eq!(mardi.badges[0].band, CoefficientBand::Faible);
    assert_eq!(mardi.description, "Marées de morte-eau");
}

/// Events are listed chronologically even though the table is not.
#[test]
fn day_events_are_chronological() {
    let view = calendar(&open(9, 2025));

    let mardi = &view.days[1];
    let times: Vec<&str> = mardi.events.iter().map(|e| e.time.as_str()).collect();
    assert_eq!(times, ["01:19", "06:21", "13:52", "19:11"]);

    let types: Vec<TideType> = mardi.events.iter().map(|e| e.tide_type).collect();
    assert_eq!(
        types,
        [TideType::High, TideType::Low, TideType::High, TideType::Low]
    );
}

/// Coefficient bands across the month cover Faible and Moyen.
#[test]
fn descriptions_follow_coefficient_bands() {
    let view = calendar(&open(9, 2025));

    let descriptions: Vec<(&str, &str)> = view
        .days
        .iter()
        .map(|card| (card.heading.as_str(), card.description))
        .collect();

    assert!(descriptions.contains(&("SAM 6", "Marées de morte-eau"))); // 42
    assert!(descriptions.contains(&("DIM 7", "Marées moyennes"))); // 49
    assert!(descriptions.contains(&("MER 10", "Marées moyennes"))); // 69
}

/// Selecting A then B leaves only B selected.
#[test]
fn selection_is_exclusive() {
    let model = open(9, 2025);
    assert!(selected_headings(&model).is_empty());

    let model = send(&model, ViewerMsg::SelectDay("2025-09-01".to_string()));
    assert_eq!(selected_headings(&model), ["LUN 1"]);

    let model = send(&model, ViewerMsg::SelectDay("2025-09-02".to_string()));
    assert_eq!(selected_headings(&model), ["MAR 2"]);

    let model = send(&model, ViewerMsg::SelectDay("2025-09-03".to_string()));
    assert_eq!(selected_headings(&model), ["MER 3"]);

    // Clicking the selected day again keeps it selected
    let model = send(&model, ViewerMsg::SelectDay("2025-09-03".to_string()));
    assert_eq!(selected_headings(&model), ["MER 3"]);
}

/// Double toggle restores the time format and leaves everything else alone.
#[test]
fn toggles_are_reversible_and_independent() {
    let model = open(9, 2025);
    let model = send(&model, ViewerMsg::SelectDay("2025-09-05".to_string()));
    let before = model.clone();

    let once = send(&model, ViewerMsg::ToggleTimeFormat);
    assert_eq!(once.display_options.time_format, TimeFormat::H12);
    assert_eq!(once.display_options.height_unit, before.display_options.height_unit);
    assert_eq!(once.display_options.show_tide_type, before.display_options.show_tide_type);
    assert_eq!(once.selected_date, before.selected_date);

    let twice = send(&once, ViewerMsg::ToggleTimeFormat);
    assert_eq!(twice, before);
}

/// Toggles change what every event row shows.
#[test]
fn toggles_change_rendered_rows() {
    let model = open(9, 2025);
    let model = send(&model, ViewerMsg::ToggleTimeFormat);
    let model = send(&model, ViewerMsg::ToggleHeightUnit);
    let model = send(&model, ViewerMsg::ToggleTideType);

    assert_eq!(model.display_options.height_unit, HeightUnit::Feet);

    let screen = build_screen(&model);
    let Screen::Calendar { controls, calendar } = screen else {
        panic!("Expected the calendar");
    };
    assert_eq!(controls.time_format, "Format: 12h");
    assert_eq!(controls.height_unit, "Unité: ft");
    assert_eq!(controls.tide_type, "Afficher types");

    let lundi = &calendar.days[0];
    assert_eq!(lundi.events[0].time, "5:05 AM");
    assert_eq!(lundi.events[1].time, "12:27 PM");
    assert_eq!(lundi.events[1].height, "14.9ft");
    assert!(calendar
        .days
        .iter()
        .flat_map(|card| &card.events)
        .all(|row| row.type_label.is_none()));
}

/// Switching month clears the selection but keeps preferences.
#[test]
fn period_change_keeps_preferences() {
    let model = open(9, 2025);
    let model = send(&model, ViewerMsg::ToggleHeightUnit);
    let model = send(&model, ViewerMsg::SelectDay("2025-09-04".to_string()));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("Should build runtime");
    let october = rt.block_on(dispatch(
        &StaticTideTable::reference(),
        &model,
        ViewerMsg::SetPeriod {
            month: 10,
            year: 2025,
        },
        Duration::ZERO,
    ));

    assert_eq!(october.status, ViewerStatus::NotFound);
    assert_eq!(october.selected_date, None);
    assert_eq!(october.display_options.height_unit, HeightUnit::Feet);

    let back = rt.block_on(dispatch(
        &StaticTideTable::reference(),
        &october,
        ViewerMsg::SetPeriod {
            month: 9,
            year: 2025,
        },
        Duration::ZERO,
    ));
    assert_eq!(calendar(&back).days[0].events[0].height, "9.8ft");
}

/// The JSON snapshot exposes the same view for other front ends.
#[test]
fn json_snapshot_describes_calendar() {
    let model = send(
        &open(9, 2025),
        ViewerMsg::SelectDay("2025-09-09".to_string()),
    );
    let json = serde_json::to_value(build_screen(&model)).expect("Should serialize screen");

    assert_eq!(json["screen"], "calendar");
    assert_eq!(json["calendar"]["title"], "Marées de Septembre 2025");
    assert_eq!(json["controls"]["time_format"], "Format: 24h");

    let days = json["calendar"]["days"].as_array().expect("days array");
    assert_eq!(days.len(), 10);
    assert_eq!(days[8]["heading"], "MAR 9");
    assert_eq!(days[8]["selected"], true);
    assert_eq!(days[8]["events"][0]["time"], "00:54");
    assert_eq!(days[8]["events"][0]["type_label"], "Haute");
}
