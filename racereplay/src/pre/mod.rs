pub mod check_replay_opts_pars;
pub mod read_replay_pars;
pub mod replay_opts;
