use extrema_core::{IntensityImage, Point};

use crate::error::{SelectError, SelectResult};

/// Which sign of intensity marks a better feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Larger values are better
    #[default]
    Positive,
    /// More negative values are better
    Negative,
}

impl Polarity {
    /// Maps an intensity to a score where larger is always better.
    /// Zero always scores `+0.0` so signed zeros compare as a tie.
    #[inline]
    pub fn score(self, value: f32) -> f32 {
        let score = match self {
            Polarity::Positive => value,
            Polarity::Negative => -value,
        };
        score + 0.0
    }
}

impl From<bool> for Polarity {
    /// `true` prefers positive values
    fn from(prefer_positive: bool) -> Self {
        if prefer_positive {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

/// Fills `scores` with one polarity-adjusted score per point
pub(crate) fn score_points(
    intensity: &IntensityImage,
    polarity: Polarity,
    points: &[Point],
    scores: &mut Vec<f32>,
) -> SelectResult<()> {
    scores.clear();
    if intensity.is_empty() {
        return Err(SelectError::EmptyImage {
            width: intensity.width(),
            height: intensity.height(),
        });
    }
    scores.reserve(points.len());
    for p in points {
        let value = intensity.get(p.x, p.y).ok_or(SelectError::PointOutsideImage {
            x: p.x,
            y: p.y,
            width: intensity.width(),
            height: intensity.height(),
        })?;
        scores.push(polarity.score(value));
    }
    Ok(())
}
