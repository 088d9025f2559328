use crate::pre::read_replay_pars::ReplayPars;
use crate::pre::replay_opts::ReplayOpts;
use anyhow::Context;
use helpers::general::InputValueError;

/// check_replay_opts_pars assures that the inserted options and parameters are within reasonable
/// limits and raises an error if not.
pub fn check_replay_opts_pars(
    replay_opts: &ReplayOpts,
    replay_pars: &ReplayPars,
) -> anyhow::Result<()> {
    // PART 1: REPLAY OPTIONS
    if !(0.001 <= replay_opts.frame_delay && replay_opts.frame_delay <= 10.0) {
        return Err(InputValueError).context(format!(
            "frame_delay is {:.3}s, which is not within the reasonable range of [0.001, 10.0]s!",
            replay_opts.frame_delay
        ));
    }

    if !(1.0 <= replay_opts.tick_rate && replay_opts.tick_rate <= 1000.0) {
        return Err(InputValueError).context(format!(
            "tick_rate is {:.1}Hz, which is not within the reasonable range of [1.0, 1000.0]Hz!",
            replay_opts.tick_rate
        ));
    }

    // PART 2: REPLAY PARAMETERS
    check_replay_pars(replay_pars)
}

/// check_replay_pars assures that every driver has initials and belongs to a team with a color.
pub fn check_replay_pars(replay_pars: &ReplayPars) -> anyhow::Result<()> {
    let mut car_nos: Vec<&u32> = replay_pars.driver_pars_all.keys().collect();
    car_nos.sort_unstable();

    for car_no in car_nos {
        let driver_pars = &replay_pars.driver_pars_all[car_no];

        if driver_pars.initials.trim().is_empty() {
            return Err(InputValueError)
                .context(format!("Driver initials of car {} are empty!", car_no));
        }

        if !replay_pars.team_pars_all.contains_key(&driver_pars.team) {
            return Err(InputValueError).context(format!(
                "Team {} of car {} has no entry in the team parameters!",
                driver_pars.team, car_no
            ));
        }
    }

    Ok(())
}
