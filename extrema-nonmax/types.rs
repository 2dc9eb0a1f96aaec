use extrema_core::{IntensityImage, Point};

use crate::search::WindowSearch;

/// Half-open pixel window `[x0, x1) x [y0, y1)` clipped to the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Window {
    /// Square window of `radius` around `(x, y)`, clipped to the image bounds.
    /// The center must lie inside the image.
    pub fn around(image: &IntensityImage, x: usize, y: usize, radius: usize) -> Self {
        Self {
            x0: x.saturating_sub(radius),
            y0: y.saturating_sub(radius),
            x1: (x + radius + 1).min(image.width()),
            y1: (y + radius + 1).min(image.height()),
        }
    }

    pub fn area(&self) -> usize {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }
}

/// Which kind of extremum a pass is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Minimum,
    Maximum,
}

/// Scratch state owned by exactly one worker during a scan
pub struct SearchData {
    pub search: Box<dyn WindowSearch>,
    pub corners: Vec<Point>,
}

impl SearchData {
    pub fn new(search: Box<dyn WindowSearch>) -> Self {
        Self {
            search,
            corners: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.corners.clear();
    }
}
