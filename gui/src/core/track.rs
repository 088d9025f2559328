use helpers::general::{max, min};
use helpers::geometry::Point2d;
use racereplay::core::frame::FrameSequence;
use std::collections::HashMap;

/// Track is derived from the replayed data, since the dataset contains no track layout. The
/// racing line is the trajectory of the car that appears in most frames, the bounds cover all
/// positions of all cars.
#[derive(Debug)]
pub struct Track {
    pub racing_line: Vec<Point2d>,
    pub bounds: Option<[f64; 4]>,
}

impl Track {
    pub fn from_frames(frames: &FrameSequence) -> Track {
        // collect all finite positions in the x/y plane
        let coords: Vec<Point2d> = frames
            .iter()
            .flat_map(|frame| frame.car_positions.values())
            .filter(|pos| pos.is_finite())
            .map(|pos| pos.as_point2d())
            .collect();

        let xs: Vec<f64> = coords.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = coords.iter().map(|p| p.y).collect();

        let bounds = match (min(&xs), max(&xs), min(&ys), max(&ys)) {
            (Some(x_min), Some(x_max), Some(y_min), Some(y_max)) => {
                Some([x_min, x_max, y_min, y_max])
            }
            _ => None,
        };

        // determine the car that appears most often (smallest car number on ties)
        let mut no_appearances: HashMap<u32, usize> = HashMap::new();

        for frame in frames.iter() {
            for &car_no in frame.car_positions.keys() {
                *no_appearances.entry(car_no).or_insert(0) += 1;
            }
        }

        let reference_car = no_appearances
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&car_no, _)| car_no);

        let racing_line = match reference_car {
            Some(car_no) => frames
                .get_trajectory(car_no)
                .iter()
                .filter(|pos| pos.is_finite())
                .map(|pos| pos.as_point2d())
                .collect(),
            None => vec![],
        };

        Track {
            racing_line,
            bounds,
        }
    }

    /// get_axes_expansion returns [x_min, x_max, y_min, y_max] of the area covered by the cars
    /// plus padding, expanded to a square shape.
    pub fn get_axes_expansion(&self, padding_size: f64) -> [f64; 4] {
        let [mut x_min, mut x_max, mut y_min, mut y_max] =
            self.bounds.unwrap_or([-1.0, 1.0, -1.0, 1.0]);

        // apply padding
        x_min -= padding_size;
        x_max += padding_size;
        y_min -= padding_size;
        y_max += padding_size;

        // update min and max values such that its a square shape
        let width = x_max - x_min;
        let height = y_max - y_min;

        if width > height {
            let diff = width - height;
            y_min -= diff / 2.0;
            y_max += diff / 2.0;
        } else {
            let diff = height - width;
            x_min -= diff / 2.0;
            x_max += diff / 2.0;
        }

        [x_min, x_max, y_min, y_max]
    }
}
