//! Interactive command parsing.
//!
//! Each line typed in interactive mode maps to one [`Input`]:
//!
//! | command              | effect                          |
//! |----------------------|---------------------------------|
//! | `t`                  | toggle 12h / 24h                |
//! | `u`                  | toggle m / ft                   |
//! | `y`                  | show / hide tide types          |
//! | `s 2025-09-05`, `s 5`| select a day by date or number  |
//! | `r`                  | retry after an error            |
//! | `p 10 2025`          | switch to another month         |
//! | `h`, `?`             | help                            |
//! | `q`                  | quit                            |

use crate::viewer::{ViewerModel, ViewerMsg};

pub const HELP: &str = "\
Commandes:
  t              format 12h/24h
  u              unité m/ft
  y              afficher/masquer les types
  s <date|jour>  sélectionner un jour (ex: s 2025-09-05, s 5)
  r              réessayer
  p <mois> <an>  changer de mois
  q              quitter";

#[derive(Clone, Debug)]
pub enum Input {
    Message(ViewerMsg),
    Help,
    Quit,
    /// Nothing to do (blank line)
    Empty,
    /// Unrecognized command, with a short reason
    Invalid(String),
}

/// Parse one line of user input against the current model.
///
/// Day numbers are resolved against the loaded month; a bare number that
/// matches no day is reported as invalid.
pub fn parse_input(line: &str, model: &ViewerModel) -> Input {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Input::Empty;
    };
    let args: Vec<&str> = words.collect();

    match (command, args.as_slice()) {
        ("t", []) => Input::Message(ViewerMsg::ToggleTimeFormat),
        ("u", []) => Input::Message(ViewerMsg::ToggleHeightUnit),
        ("y", []) => Input::Message(ViewerMsg::ToggleTideType),
        ("r", []) => Input::Message(ViewerMsg::Retry),
        ("h", []) | ("?", []) => Input::Help,
        ("q", []) => Input::Quit,
        ("s", [day]) => select(day, model),
        ("p", [month, year]) => match (month.parse::<u32>(), year.parse::<i32>()) {
            (Ok(month), Ok(year)) => Input::Message(ViewerMsg::SetPeriod { month, year }),
            _ => Input::Invalid(format!("période invalide: {} {}", month, year)),
        },
        _ => Input::Invalid(format!("commande inconnue: {}", line.trim())),
    }
}

fn select(day: &str, model: &ViewerModel) -> Input {
    if day.contains('-') {
        return Input::Message(ViewerMsg::SelectDay(day.to_string()));
    }

    let number = match day.parse::<u8>() {
        Ok(number) => number,
        Err(_) => return Input::Invalid(format!("jour invalide: {}", day)),
    };

    model
        .month_data()
        .and_then(|month| month.days.iter().find(|d| d.day_number == number))
        .map(|d| Input::Message(ViewerMsg::SelectDay(d.date.clone())))
        .unwrap_or_else(|| Input::Invalid(format!("aucun jour {}", number)))
}
