use helpers::geometry::Point3d;
use std::collections::HashMap;

pub type Position = Point3d;

/// * `time_delta` - Informational time stamp as given in the dataset (not used for indexing)
/// * `car_positions` - Map from car number to position, cars can be missing in a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub time_delta: String,
    pub car_positions: HashMap<u32, Position>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.car_positions.is_empty()
    }

    /// The method returns the car numbers contained in the frame in ascending order.
    pub fn get_car_nos(&self) -> Vec<u32> {
        let mut car_nos: Vec<u32> = self.car_positions.keys().copied().collect();
        car_nos.sort_unstable();
        car_nos
    }
}

/// FrameSequence holds the frames of one dataset, indexed contiguously from 0. It is never
/// mutated after loading and therefore shared behind an `Arc` between the replay thread and the
/// GUI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn new(frames: Vec<Frame>) -> FrameSequence {
        FrameSequence { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, frame_idx: usize) -> Option<&Frame> {
        self.frames.get(frame_idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// The method returns the positions of a single car over all frames it appears in.
    pub fn get_trajectory(&self, car_no: u32) -> Vec<Position> {
        self.frames
            .iter()
            .filter_map(|frame| frame.car_positions.get(&car_no).copied())
            .collect()
    }
}
