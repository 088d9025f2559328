use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "RS-RP",
    about = "Replays recorded race car positions at a fixed frame rate"
)]
pub struct ReplayOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate GUI (otherwise the replay runs headless and logs its progress)
    #[clap(short, long)]
    pub gui: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the race data file (JSON with the frames of car positions)
    #[clap(parse(from_os_str), short, long)]
    pub datafile_path: PathBuf,

    /// Set path to the parameter file containing drivers and team colors (uses the built-in 2019
    /// grid if not set)
    #[clap(parse(from_os_str), short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set delay between two replayed frames in seconds, should be in the range [0.001, 10.0]
    #[clap(short, long, default_value = "0.1")]
    pub frame_delay: f64,

    /// Set the rate in Hz at which the replay loop runs, should be in the range [1.0, 1000.0]
    #[clap(short, long, default_value = "60.0")]
    pub tick_rate: f64,
}
