use crate::core::scheduler::PlaybackState;
use helpers::geometry::Point3d;
use std::fmt;

pub const MAX_GUI_UPDATE_FREQUENCY: f64 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor {
        r: 255,
        g: 255,
        b: 255,
    };
}

/// Canonical form `#RRGGBB`.
impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CarState {
    pub car_no: u32,
    pub driver_initials: String,
    pub color: RgbColor,
    pub pos: Point3d,
}

/// * `car_states` - Cars of the most recently presented frame
/// * `cur_frame` - Index of the next frame to be presented (equals the number of presented frames
/// since the last start)
/// * `tot_no_frames` - Number of frames in the replayed dataset
/// * `playback_state` - State of the replay scheduler
#[derive(Debug, Clone, Default)]
pub struct RaceState {
    pub car_states: Vec<CarState>,
    pub cur_frame: usize,
    pub tot_no_frames: usize,
    pub playback_state: PlaybackState,
}

/// Control commands sent from the GUI back to the replay thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Start,
    Stop,
    Reset,
    Quit,
}
