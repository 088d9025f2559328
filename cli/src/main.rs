use clap::Parser;
use gui::core::gui::RacePlot;
use racereplay::core::handle_replay::handle_replay;
use racereplay::core::loader::DatasetLoader;
use racereplay::core::registry::EntityRegistry;
use racereplay::pre::check_replay_opts_pars::check_replay_opts_pars;
use racereplay::pre::read_replay_pars::{read_replay_pars, ReplayPars};
use racereplay::pre::replay_opts::ReplayOpts;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get replay options from the command line arguments and read replay parameters
    let replay_opts: ReplayOpts = ReplayOpts::parse();
    let replay_pars = match &replay_opts.parfile_path {
        Some(parfile_path) => read_replay_pars(parfile_path.as_path())?,
        None => ReplayPars::default(),
    };

    // check replay options and parameters
    check_replay_opts_pars(&replay_opts, &replay_pars)?;

    // the registry is owned here and handed to whoever needs display information
    let registry = EntityRegistry::new(&replay_pars);
    let mut loader = DatasetLoader::new();

    info!(
        "Replaying {} with a frame delay of {:.3}s",
        replay_opts.datafile_path.display(),
        replay_opts.frame_delay
    );

    // EXECUTION -----------------------------------------------------------------------------------
    if !replay_opts.gui {
        // NON-GUI CASE ----------------------------------------------------------------------------
        let frames = loader.load(replay_opts.datafile_path.as_path())?;
        let t_start = Instant::now();

        let replay_result = handle_replay(
            frames,
            &registry,
            replay_opts.frame_delay,
            replay_opts.tick_rate,
            None,
            None,
        )?;

        info!(
            "Execution time (total): {}ms",
            t_start.elapsed().as_millis()
        );

        // POST-PROCESSING -------------------------------------------------------------------------
        replay_result.print_summary();
    } else {
        // GUI CASE --------------------------------------------------------------------------------
        // a failed load results in an empty window, the scheduler refuses to start without data
        let frames = loader.load_or_empty(replay_opts.datafile_path.as_path());

        // create channels for communication between GUI and replay (race states to the GUI,
        // playback commands back)
        let (tx, rx) = flume::unbounded();
        let (tx_cmd, rx_cmd) = flume::unbounded();

        // create a separate thread for the replay (executed in real-time)
        let frames_thread = Arc::clone(&frames);
        let registry_thread = registry.clone();
        let replay_opts_thread = replay_opts.clone();

        let _ = thread::spawn(move || {
            let result = handle_replay(
                frames_thread,
                &registry_thread,
                replay_opts_thread.frame_delay,
                replay_opts_thread.tick_rate,
                Some(&tx),
                Some(&rx_cmd),
            );

            match result {
                Ok(replay_result) => replay_result.print_summary(),
                Err(err) => error!("Replay failed: {:#}", err),
            }
        });

        // start GUI (must be done in the main thread)
        let gui = RacePlot::new(rx, tx_cmd, &frames);
        let native_options = eframe::NativeOptions::default();
        eframe::run_native(Box::new(gui), native_options);
    }

    Ok(())
}
