use crate::core::frame::{Frame, FrameSequence};
use crate::core::registry::{EntityRegistry, DEFAULT_COLOR};
use crate::core::scheduler::{FrameSink, PlaybackState, Scheduler};
use crate::interfaces::gui_interface::{
    CarState, PlaybackCommand, RaceState, RgbColor, MAX_GUI_UPDATE_FREQUENCY,
};
use crate::post::replay_result::{CarAppearance, ReplayResult};
use anyhow::Context;
use flume::{Receiver, Sender, TryRecvError};
use helpers::general::InputValueError;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const MAX_DURATION_SECS: f64 = 86_400.0;

#[derive(Debug, Clone)]
struct CarDisplay {
    driver_initials: String,
    color: RgbColor,
}

/// ReplayPresenter turns presented frames into race states for the GUI and counts what was
/// presented. Display information is resolved once per car, such that a configuration error is
/// reported only once.
#[derive(Debug)]
pub struct ReplayPresenter<'a> {
    registry: &'a EntityRegistry,
    car_displays: HashMap<u32, CarDisplay>,
    appearances: HashMap<u32, usize>,
    no_frames_presented: usize,
    no_empty_frames: usize,
    latest_frame: Option<(usize, Vec<CarState>)>,
    cars_with_configuration_errors: Vec<u32>,
}

impl<'a> ReplayPresenter<'a> {
    pub fn new(registry: &'a EntityRegistry) -> ReplayPresenter<'a> {
        ReplayPresenter {
            registry,
            car_displays: HashMap::new(),
            appearances: HashMap::new(),
            no_frames_presented: 0,
            no_empty_frames: 0,
            latest_frame: None,
            cars_with_configuration_errors: vec![],
        }
    }

    fn get_car_display(&mut self, car_no: u32) -> CarDisplay {
        if let Some(car_display) = self.car_displays.get(&car_no) {
            return car_display.clone();
        }

        let color = match self.registry.color_for(car_no) {
            Ok(color) => color,
            Err(err) => {
                error!("{}, using default color", err);
                self.cars_with_configuration_errors.push(car_no);
                DEFAULT_COLOR
            }
        };
        let car_display = CarDisplay {
            driver_initials: self.registry.display_code_for(car_no),
            color,
        };

        self.car_displays.insert(car_no, car_display.clone());
        car_display
    }

    /// The method returns index and car states of the most recently presented frame (if there is
    /// a new one since the last call).
    pub fn take_latest_frame(&mut self) -> Option<(usize, Vec<CarState>)> {
        self.latest_frame.take()
    }

    pub fn get_replay_result(&self, tot_no_frames: usize) -> ReplayResult {
        let mut car_nos: Vec<u32> = self.appearances.keys().copied().collect();
        car_nos.sort_unstable();

        let car_appearances = car_nos
            .iter()
            .map(|&car_no| CarAppearance {
                car_no,
                driver_initials: self.registry.display_code_for(car_no),
                no_frames: self.appearances[&car_no],
            })
            .collect();

        let mut cars_with_configuration_errors = self.cars_with_configuration_errors.clone();
        cars_with_configuration_errors.sort_unstable();

        ReplayResult {
            tot_no_frames,
            no_frames_presented: self.no_frames_presented,
            no_empty_frames: self.no_empty_frames,
            car_appearances,
            cars_with_configuration_errors,
        }
    }
}

impl FrameSink for ReplayPresenter<'_> {
    fn present_frame(&mut self, frame_idx: usize, frame: &Frame) {
        self.no_frames_presented += 1;

        if frame.is_empty() {
            self.no_empty_frames += 1;
            debug!(frame_idx, "Presenting empty frame");
        }

        // sort car states by car number to make sure the drawing order does not change
        let car_nos = frame.get_car_nos();
        let mut car_states = Vec::with_capacity(car_nos.len());

        for car_no in car_nos {
            let car_display = self.get_car_display(car_no);
            *self.appearances.entry(car_no).or_insert(0) += 1;

            car_states.push(CarState {
                car_no,
                driver_initials: car_display.driver_initials,
                color: car_display.color,
                pos: frame.car_positions[&car_no],
            });
        }

        self.latest_frame = Some((frame_idx, car_states));
    }
}

/// apply_command forwards a GUI command to the scheduler. It returns false if the replay should
/// quit.
fn apply_command(scheduler: &mut Scheduler, command: PlaybackCommand) -> bool {
    debug!(?command, "Received playback command");

    match command {
        PlaybackCommand::Start => {
            scheduler.start();
        }
        PlaybackCommand::Stop => scheduler.stop(),
        PlaybackCommand::Reset => scheduler.reset(),
        PlaybackCommand::Quit => return false,
    }
    true
}

/// secs_to_duration converts a positive number of seconds into a duration. Other values (zero,
/// negative, NaN, infinite or out of range) are rejected.
fn secs_to_duration(secs: f64, name: &str) -> anyhow::Result<Duration> {
    if !(secs.is_finite() && secs > 0.0 && secs <= MAX_DURATION_SECS) {
        return Err(InputValueError).context(format!(
            "{} is {}s, which cannot be used as replay timing!",
            name, secs
        ));
    }
    Ok(Duration::from_secs_f64(secs))
}

/// handle_replay replays the inserted frames in real-time and returns a summary for
/// post-processing. Without a command receiver (headless case) the replay ends as soon as the
/// scheduler stops running. With a command receiver, it runs until Quit is received or the GUI
/// side of the channel is dropped.
pub fn handle_replay(
    frames: Arc<FrameSequence>,
    registry: &EntityRegistry,
    frame_delay: f64,
    tick_rate: f64,
    tx: Option<&Sender<RaceState>>,
    rx_cmd: Option<&Receiver<PlaybackCommand>>,
) -> anyhow::Result<ReplayResult> {
    let frame_delay = secs_to_duration(frame_delay, "frame_delay")?;
    let tick_period = secs_to_duration(1.0 / tick_rate, "tick period (1 / tick_rate)")?;

    // create the scheduler and start it right away
    let mut scheduler = Scheduler::with_frames(frames, frame_delay);
    let mut presenter = ReplayPresenter::new(registry);
    let tot_no_frames = scheduler.tot_no_frames();

    scheduler.start();

    let gui_update_period = Duration::from_secs_f64(1.0 / MAX_GUI_UPDATE_FREQUENCY);

    let mut t_prev_tick = Instant::now();
    let mut t_status_print = Instant::now();
    let mut t_gui_update: Option<Instant> = None;
    let mut prev_playback_state = scheduler.state();
    let mut last_race_state = RaceState {
        tot_no_frames,
        ..Default::default()
    };
    let mut gui_outdated = true;

    'replay: loop {
        let t_start = Instant::now();

        // handle commands from the GUI
        if let Some(rx_cmd) = rx_cmd {
            loop {
                match rx_cmd.try_recv() {
                    Ok(command) => {
                        if !apply_command(&mut scheduler, command) {
                            break 'replay;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        debug!("Command channel disconnected");
                        break 'replay;
                    }
                }
            }
        }

        // advance the replay by the time passed since the previous tick
        scheduler.tick(t_start.duration_since(t_prev_tick), &mut presenter);
        t_prev_tick = t_start;

        if let Some((_, car_states)) = presenter.take_latest_frame() {
            last_race_state.car_states = car_states;
            gui_outdated = true;
        }
        if scheduler.state() != prev_playback_state {
            prev_playback_state = scheduler.state();
            gui_outdated = true;
        }

        // update GUI (with a maximum of MAX_GUI_UPDATE_FREQUENCY)
        if let Some(tx) = tx {
            let gui_update_due = t_gui_update
                .map(|t| t.elapsed() >= gui_update_period)
                .unwrap_or(true);

            if gui_outdated && gui_update_due {
                last_race_state.cur_frame = scheduler.cur_frame();
                last_race_state.playback_state = scheduler.state();
                tx.send(last_race_state.clone())
                    .context("Failed to send race state to GUI!")?;
                t_gui_update = Some(Instant::now());
                gui_outdated = false;
            }
        }

        // print status (with a maximum of 1 Hz)
        if t_status_print.elapsed() >= Duration::from_secs(1) {
            info!(
                "Replaying... Current frame is {}/{}",
                scheduler.cur_frame(),
                tot_no_frames
            );
            t_status_print = Instant::now();
        }

        if rx_cmd.is_none() && scheduler.state() != PlaybackState::Running {
            break;
        }

        // sleep until the tick period is over
        match tick_period.checked_sub(t_start.elapsed()) {
            Some(t_sleep) if t_sleep > Duration::ZERO => sleep(t_sleep),
            _ => warn!("Could not keep up with the tick rate!"),
        }
    }

    Ok(presenter.get_replay_result(tot_no_frames))
}
