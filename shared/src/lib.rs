use serde::{Deserialize, Serialize};

mod color;
mod config;
mod engine;
mod error;
mod history;
mod surface;

pub use color::{ColorParseError, Rgb};
pub use config::{BoardConfig, StrokeConfig, StrokeStyle, Tool};
pub use engine::{PngExport, Whiteboard, EXPORT_FILE_NAME};
pub use error::WhiteboardError;
pub use history::{History, Snapshot};
pub use surface::{DirtyRect, Surface};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns `None` when either coordinate is NaN or infinite.
    pub fn normalized(self) -> Option<Self> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        Some(self)
    }

    pub fn relative_to(self, origin: Point) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_points() {
        assert_eq!(Point::new(f32::NAN, 1.0).normalized(), None);
        assert_eq!(Point::new(1.0, f32::INFINITY).normalized(), None);
        assert_eq!(
            Point::new(3.0, 4.0).normalized(),
            Some(Point::new(3.0, 4.0))
        );
    }

    #[test]
    fn relative_to_subtracts_origin() {
        let local = Point::new(120.0, 75.5).relative_to(Point::new(20.0, 50.0));
        assert_eq!(local, Point::new(100.0, 25.5));
    }
}
