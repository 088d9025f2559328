use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;

/// * `initials` - Driver code shown next to the car, e.g. VER
/// * `team` - Team the driver belongs to, e.g. RB (must be contained in the team parameters)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DriverPars {
    pub initials: String,
    pub team: String,
}

/// * `color` - Hex-code of the team color, with or without leading #, e.g. 1E1E5F
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TeamPars {
    pub color: String,
}

/// ReplayPars contains the static configuration tables, i.e. the drivers (by car number) and the
/// teams (by team abbreviation).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReplayPars {
    pub driver_pars_all: HashMap<u32, DriverPars>,
    pub team_pars_all: HashMap<String, TeamPars>,
}

/// read_replay_pars reads the JSON file and decodes the JSON string into the replay parameters
/// struct.
pub fn read_replay_pars(filepath: &Path) -> anyhow::Result<ReplayPars> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .with_context(|| format!("Failed to open parameter file {}!", filepath.display()))?;

    // read and parse parameter file content
    let pars = serde_json::from_reader(&fh)
        .with_context(|| format!("Failed to parse parameter file {}!", filepath.display()))?;
    Ok(pars)
}

const DRIVERS_2019: [(u32, &str, &str); 20] = [
    (33, "VER", "RB"),
    (16, "LEC", "FER"),
    (77, "BOT", "MERC"),
    (5, "VET", "FER"),
    (44, "HAM", "MERC"),
    (4, "NOR", "MCL"),
    (10, "GAS", "RB"),
    (55, "SAI", "MCL"),
    (7, "RAI", "ALFA"),
    (99, "GIO", "ALFA"),
    (11, "PER", "RP"),
    (3, "HUL", "REN"),
    (27, "RIC", "REN"),
    (18, "STR", "RP"),
    (23, "ALB", "TORO"),
    (8, "GRO", "HAAS"),
    (26, "KYT", "TORO"),
    (63, "RUS", "WIL"),
    (20, "MAG", "HAAS"),
    (88, "KUB", "WIL"),
];

const TEAM_COLORS_2019: [(&str, &str); 10] = [
    ("MERC", "8A8D8F"),
    ("RB", "1E1E5F"),
    ("FER", "D40000"),
    ("MCL", "FF6A13"),
    ("REN", "FFB800"),
    ("TORO", "1C66B8"),
    ("RP", "F06292"),
    ("ALFA", "9E1B32"),
    ("HAAS", "A4A29A"),
    ("WIL", "005AA7"),
];

/// The default parameters contain the 2019 Formula 1 grid.
impl Default for ReplayPars {
    fn default() -> Self {
        let driver_pars_all = DRIVERS_2019
            .iter()
            .map(|&(car_no, initials, team)| {
                (
                    car_no,
                    DriverPars {
                        initials: initials.to_owned(),
                        team: team.to_owned(),
                    },
                )
            })
            .collect();

        let team_pars_all = TEAM_COLORS_2019
            .iter()
            .map(|&(team, color)| {
                (
                    team.to_owned(),
                    TeamPars {
                        color: color.to_owned(),
                    },
                )
            })
            .collect();

        ReplayPars {
            driver_pars_all,
            team_pars_all,
        }
    }
}
