use approx::ulps_eq;
use serde::Deserialize;

// 2D ----------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Point2d {
    fn eq(&self, other: &Self) -> bool {
        ulps_eq!(self.x, other.x) && ulps_eq!(self.y, other.y)
    }
}

// 3D ----------------------------------------------------------------------------------------------
/// Point3d is used for car positions. No units are enforced, the replay only passes the
/// coordinates through.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub fn new(x: f64, y: f64, z: f64) -> Point3d {
        Point3d { x, y, z }
    }
    /// Projection onto the x/y plane (z is treated as elevation).
    pub fn as_point2d(&self) -> Point2d {
        Point2d {
            x: self.x,
            y: self.y,
        }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl PartialEq for Point3d {
    fn eq(&self, other: &Self) -> bool {
        ulps_eq!(self.x, other.x) && ulps_eq!(self.y, other.y) && ulps_eq!(self.z, other.z)
    }
}
