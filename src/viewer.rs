//! # Viewer State Machine
//!
//! The viewer owns the requested period, the load status, the display
//! preferences and the selected day. It is driven by [`ViewerMsg`] values
//! through [`update`], which never performs I/O: it returns the next model
//! and a [`ViewerCmd`] describing the load the runtime should start.
//!
//! ## Status Transitions
//!
//! ```text
//! Mount / SetPeriod / Retry ──► Loading ──► Loaded    (Ok(Some))
//!                                     ├──► NotFound  (Ok(None))
//!                                     └──► Errored   (Err)
//! ```
//!
//! Every load carries a request id. A completion whose id is not the latest
//! is stale and dropped, so a new period always supersedes a pending load.
//!
//! Toggles and day selection only apply once the month is `Loaded`. Setting
//! the period already shown does nothing.

use crate::tide_data::{TideError, TideSource};
use crate::{MonthTides, TideDisplayOptions};
use log::{debug, info, warn};
use std::time::Duration;

/// Load status of the requested month.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerStatus {
    Loading,
    Loaded(MonthTides),
    NotFound,
    /// Load failed; holds the error text for diagnostics
    Errored(String),
}

/// Complete viewer state. Cheap to clone; `update` returns a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerModel {
    pub month: u32,
    pub year: i32,
    pub status: ViewerStatus,
    pub display_options: TideDisplayOptions,
    pub selected_date: Option<String>,
    request: u64,
}

impl ViewerModel {
    /// A viewer for `(month, year)` that has not loaded yet.
    pub fn new(month: u32, year: i32) -> Self {
        ViewerModel {
            month,
            year,
            status: ViewerStatus::Loading,
            display_options: TideDisplayOptions::default(),
            selected_date: None,
            request: 0,
        }
    }

    /// Id of the most recent load request.
    pub fn request(&self) -> u64 {
        self.request
    }

    pub fn month_data(&self) -> Option<&MonthTides> {
        match &self.status {
            ViewerStatus::Loaded(month) => Some(month),
            _ => None,
        }
    }

    pub fn is_selected(&self, date: &str) -> bool {
        self.selected_date.as_deref() == Some(date)
    }
}

/// Inputs to the state machine.
#[derive(Clone, Debug)]
pub enum ViewerMsg {
    /// First display: load the configured period
    Mount,
    /// Request a different period
    SetPeriod { month: u32, year: i32 },
    /// Result of the load started for `request`
    LoadCompleted {
        request: u64,
        outcome: Result<Option<MonthTides>, TideError>,
    },
    ToggleTimeFormat,
    ToggleHeightUnit,
    ToggleTideType,
    /// Select the day with this `YYYY-MM-DD` date
    SelectDay(String),
    /// Reload after an error
    Retry,
}

/// Side effect requested by `update`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerCmd {
    None,
    Load { request: u64, month: u32, year: i32 },
}

/// Apply a message to the model.
///
/// # Example
/// ```
/// use tide_calendar_lib::viewer::{update, ViewerCmd, ViewerModel, ViewerMsg, ViewerStatus};
///
/// let model = ViewerModel::new(9, 2025);
/// let (loading, cmd) = update(&model, ViewerMsg::Mount);
/// assert_eq!(loading.status, ViewerStatus::Loading);
/// assert_eq!(cmd, ViewerCmd::Load { request: 1, month: 9, year: 2025 });
/// ```
pub fn update(model: &ViewerModel, msg: ViewerMsg) -> (ViewerModel, ViewerCmd) {
    let mut next = model.clone();

    match msg {
        ViewerMsg::Mount => {
            let cmd = begin_load(&mut next);
            (next, cmd)
        }

        ViewerMsg::SetPeriod { month, year } => {
            if (month, year) == (model.month, model.year) {
                debug!("Period {}/{} unchanged", month, year);
                return (next, ViewerCmd::None);
            }
            next.month = month;
            next.year = year;
            next.selected_date = None;
            let cmd = begin_load(&mut next);
            (next, cmd)
        }

        ViewerMsg::Retry => {
            if !matches!(model.status, ViewerStatus::Errored(_)) {
                debug!("Retry ignored outside of error state");
                return (next, ViewerCmd::None);
            }
            let cmd = begin_load(&mut next);
            (next, cmd)
        }

        ViewerMsg::LoadCompleted { request, outcome } => {
            if request != model.request {
                debug!(
                    "Dropping stale load result {} (current {})",
                    request, model.request
                );
                return (next, ViewerCmd::None);
            }

            next.status = match outcome {
                Ok(Some(month)) => {
                    info!(
                        "Loaded {} days for {} ({}/{})",
                        month.days.len(),
                        month.location,
                        month.month,
                        month.year
                    );
                    ViewerStatus::Loaded(month)
                }
                Ok(None) => {
                    info!("No tide data for {}/{}", model.month, model.year);
                    ViewerStatus::NotFound
                }
                Err(e) => {
                    warn!("Tide data load failed: {}", e);
                    ViewerStatus::Errored(e.to_string())
                }
            };
            (next, ViewerCmd::None)
        }

        ViewerMsg::ToggleTimeFormat => {
            if loaded(model) {
                next.display_options = model.display_options.toggle_time_format();
            }
            (next, ViewerCmd::None)
        }

        ViewerMsg::ToggleHeightUnit => {
            if loaded(model) {
                next.display_options = model.display_options.toggle_height_unit();
            }
            (next, ViewerCmd::None)
        }

        ViewerMsg::ToggleTideType => {
            if loaded(model) {
                next.display_options = model.display_options.toggle_tide_type();
            }
            (next, ViewerCmd::None)
        }

        ViewerMsg::SelectDay(date) => {
            match model.month_data().and_then(|month| month.day(&date)) {
                Some(day) => {
                    info!("Jour sélectionné: {} {} ({})", day.day_name, day.day_number, day.date);
                    next.selected_date = Some(date);
                }
                None => debug!("Selection of {} ignored", date),
            }
            (next, ViewerCmd::None)
        }
    }
}

fn loaded(model: &ViewerModel) -> bool {
    let is_loaded = matches!(model.status, ViewerStatus::Loaded(_));
    if !is_loaded {
        debug!("Toggle ignored while not loaded");
    }
    is_loaded
}

fn begin_load(model: &mut ViewerModel) -> ViewerCmd {
    model.request += 1;
    model.status = ViewerStatus::Loading;
    info!("Loading tide data for {}/{}", model.month, model.year);
    ViewerCmd::Load {
        request: model.request,
        month: model.month,
        year: model.year,
    }
}

/// Run one load against `source`, pausing for `delay` first.
pub async fn load_month<S: TideSource + ?Sized>(
    source: &S,
    request: u64,
    month: u32,
    year: i32,
    delay: Duration,
) -> ViewerMsg {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    ViewerMsg::LoadCompleted {
        request,
        outcome: source.lookup_month(month, year),
    }
}

/// Apply `msg` and execute any resulting loads until the model settles.
pub async fn dispatch<S: TideSource + ?Sized>(
    source: &S,
    model: &ViewerModel,
    msg: ViewerMsg,
    delay: Duration,
) -> ViewerModel {
    let (mut current, mut cmd) = update(model, msg);

    while let ViewerCmd::Load {
        request,
        month,
        year,
    } = cmd
    {
        let completed = load_month(source, request, month, year, delay).await;
        (current, cmd) = update(&current, completed);
    }

    current
}
