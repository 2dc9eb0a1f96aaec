#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marks a pixel that must never be accepted by a maximum search.
pub const EXCLUDED_MAXIMUM: f32 = f32::MAX;

/// Marks a pixel that must never be accepted by a minimum search.
pub const EXCLUDED_MINIMUM: f32 = -f32::MAX;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Image data length mismatch: expected {expected_len}, got {actual_len}")]
    InvalidImageData { expected_len: usize, actual_len: usize },

    #[error("Stride {stride} is smaller than image width {width}")]
    InvalidStride { stride: usize, width: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Row-major `f32` intensity image with an explicit row stride.
///
/// Pixel `(x, y)` lives at `data[y * stride + x]`. Trailing elements of a row
/// beyond `width` are padding and never read.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityImage {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<f32>,
}

impl IntensityImage {
    /// Zero-filled image with `stride == width`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            stride: width,
            data: vec![0.0; width * height],
        }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> CoreResult<Self> {
        Self::from_vec_with_stride(width, height, width, data)
    }

    pub fn from_vec_with_stride(
        width: usize,
        height: usize,
        stride: usize,
        data: Vec<f32>,
    ) -> CoreResult<Self> {
        if stride < width {
            return Err(CoreError::InvalidStride { stride, width });
        }
        let expected_len = stride * height;
        if data.len() != expected_len {
            return Err(CoreError::InvalidImageData {
                expected_len,
                actual_len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// True when the image has no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Offset of `(x, y)` inside `data`. Caller guarantees bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    /// Value at `(x, y)`. Panics when the coordinate is outside the image.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        debug_assert!(x < self.width && y < self.height);
        self.data[self.index(x, y)]
    }

    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        if self.contains(Point::new(x, y)) {
            Some(self.at(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Returns false and leaves the image untouched when out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: f32) -> bool {
        if !self.contains(Point::new(x, y)) {
            return false;
        }
        let idx = self.index(x as usize, y as usize);
        self.data[idx] = value;
        true
    }
}

/// Thread count used when a configuration does not specify one
pub fn default_thread_count() -> usize {
    num_cpus::get().max(1)
}
