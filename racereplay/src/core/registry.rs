use crate::interfaces::gui_interface::RgbColor;
use crate::pre::read_replay_pars::{DriverPars, ReplayPars, TeamPars};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// Color used for unknown cars and for team colors that cannot be parsed.
pub const DEFAULT_COLOR: RgbColor = RgbColor::WHITE;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("team {team} of car {car_no} has no color entry")]
    MissingTeamColor { car_no: u32, team: String },
}

/// EntityRegistry resolves the display identity (driver code and team color) of a car. It is a
/// pure function of the static tables it was created from.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    driver_pars_all: HashMap<u32, DriverPars>,
    team_pars_all: HashMap<String, TeamPars>,
}

impl EntityRegistry {
    pub fn new(replay_pars: &ReplayPars) -> EntityRegistry {
        EntityRegistry {
            driver_pars_all: replay_pars.driver_pars_all.to_owned(),
            team_pars_all: replay_pars.team_pars_all.to_owned(),
        }
    }

    /// The method returns the configured driver code, or the car number as string for unknown
    /// cars.
    pub fn display_code_for(&self, car_no: u32) -> String {
        match self.driver_pars_all.get(&car_no) {
            Some(driver_pars) => driver_pars.initials.to_owned(),
            None => car_no.to_string(),
        }
    }

    /// The method returns the team color of a car. Unknown cars get the default color, a known
    /// car whose team is missing in the team table is a configuration error.
    pub fn color_for(&self, car_no: u32) -> Result<RgbColor, ConfigurationError> {
        let driver_pars = match self.driver_pars_all.get(&car_no) {
            Some(driver_pars) => driver_pars,
            None => return Ok(DEFAULT_COLOR),
        };

        let team_pars = self.team_pars_all.get(&driver_pars.team).ok_or_else(|| {
            ConfigurationError::MissingTeamColor {
                car_no,
                team: driver_pars.team.to_owned(),
            }
        })?;

        Ok(parse_hex_color(&team_pars.color))
    }
}

/// normalize_hex_code trims the code and prepends the leading # if it is missing.
pub fn normalize_hex_code(hex_code: &str) -> String {
    let hex_code = hex_code.trim();

    if hex_code.starts_with('#') {
        hex_code.to_owned()
    } else {
        format!("#{}", hex_code)
    }
}

/// parse_hex_color converts a hex color code into an RGB color. Invalid codes are replaced by the
/// default color.
pub fn parse_hex_color(hex_code: &str) -> RgbColor {
    let hex_code = normalize_hex_code(hex_code);

    match hex_code.parse::<css_color_parser::Color>() {
        Ok(color) => RgbColor {
            r: color.r,
            g: color.g,
            b: color.b,
        },
        Err(_) => {
            warn!("Invalid hex color code {}, using default color", hex_code);
            DEFAULT_COLOR
        }
    }
}
