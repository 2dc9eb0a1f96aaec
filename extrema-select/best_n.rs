use std::cmp::Ordering;

use extrema_core::{IntensityImage, Point};
use log::debug;

use crate::config::SelectorType;
use crate::error::SelectResult;
use crate::scoring::{score_points, Polarity};
use crate::selector::{pass_through, FeatureSelector};

/// Keeps the `limit` highest scoring features, best first.
/// Equal scores keep their detection order.
#[derive(Debug, Default)]
pub struct SelectNBest {
    scores: Vec<f32>,
    order: Vec<usize>,
}

impl SelectNBest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeatureSelector for SelectNBest {
    fn select(
        &mut self,
        intensity: &IntensityImage,
        polarity: Polarity,
        _prior: Option<&[Point]>,
        detected: &[Point],
        limit: usize,
        selected: &mut Vec<Point>,
    ) -> SelectResult<()> {
        if pass_through(detected, limit, selected) {
            return Ok(());
        }
        score_points(intensity, polarity, detected, &mut self.scores)?;

        let scores = &self.scores;
        let rank = |a: &usize, b: &usize| -> Ordering {
            scores[*b].total_cmp(&scores[*a]).then(a.cmp(b))
        };

        self.order.clear();
        self.order.extend(0..detected.len());
        // Partition around the limit, then order only the kept head
        self.order.select_nth_unstable_by(limit - 1, rank);
        self.order[..limit].sort_unstable_by(rank);

        selected.extend(self.order[..limit].iter().map(|&i| detected[i]));
        debug!("best-n kept {} of {} features", selected.len(), detected.len());
        Ok(())
    }

    fn selector_type(&self) -> SelectorType {
        SelectorType::BestN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectError;

    fn scenario() -> (IntensityImage, Vec<Point>) {
        let mut intensity = IntensityImage::new(10, 20);
        intensity.set(5, 10, -3.0);
        intensity.set(4, 10, -3.5);
        intensity.set(5, 11, 0.0);
        intensity.set(8, 8, 10.0);

        let detected = vec![
            Point::new(5, 10),
            Point::new(4, 10),
            Point::new(5, 11),
            Point::new(8, 8),
        ];
        (intensity, detected)
    }

    #[test]
    fn test_too_many_features() {
        let (intensity, detected) = scenario();
        let mut alg = SelectNBest::new();
        let mut found = Vec::new();

        alg.select(&intensity, Polarity::Positive, None, &detected, 3, &mut found).unwrap();
        assert_eq!(found, vec![Point::new(8, 8), Point::new(5, 11), Point::new(5, 10)]);

        // same test, but with negative features
        alg.select(&intensity, Polarity::Negative, None, &detected, 3, &mut found).unwrap();
        assert_eq!(found, vec![Point::new(4, 10), Point::new(5, 10), Point::new(5, 11)]);
    }

    #[test]
    fn test_too_few_features() {
        let (intensity, detected) = scenario();
        let mut alg = SelectNBest::new();
        let mut found = Vec::new();

        alg.select(&intensity, Polarity::Positive, None, &detected, 20, &mut found).unwrap();
        assert_eq!(found, detected);
    }

    #[test]
    fn test_ties_keep_detection_order() {
        let intensity = IntensityImage::new(6, 6);
        let detected: Vec<Point> = (0..6).map(|i| Point::new(i, 5 - i)).collect();
        let mut alg = SelectNBest::new();
        let mut found = Vec::new();

        alg.select(&intensity, Polarity::Positive, None, &detected, 4, &mut found).unwrap();
        assert_eq!(found, detected[..4].to_vec());
    }

    #[test]
    fn test_signed_zeros_tie() {
        let mut intensity = IntensityImage::new(4, 1);
        intensity.set(0, 0, -0.0);
        intensity.set(1, 0, 0.0);
        intensity.set(2, 0, -1.0);
        let detected = vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        let mut alg = SelectNBest::new();
        let mut found = Vec::new();

        alg.select(&intensity, Polarity::Positive, None, &detected, 1, &mut found).unwrap();
        assert_eq!(found, vec![Point::new(0, 0)]);

        // negation turns +0.0 into -0.0, the earlier point still wins
        intensity.set(2, 0, 1.0);
        alg.select(&intensity, Polarity::Negative, None, &detected, 2, &mut found).unwrap();
        assert_eq!(found, vec![Point::new(0, 0), Point::new(1, 0)]);
    }

    #[test]
    fn test_limit_zero() {
        let (intensity, detected) = scenario();
        let mut alg = SelectNBest::new();
        let mut found = vec![Point::new(1, 1)];

        alg.select(&intensity, Polarity::Positive, None, &detected, 0, &mut found).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_point_outside_image() {
        let (intensity, mut detected) = scenario();
        detected.push(Point::new(10, 0));
        let mut alg = SelectNBest::new();
        let mut found = Vec::new();

        let result = alg.select(&intensity, Polarity::Positive, None, &detected, 2, &mut found);
        assert!(matches!(result, Err(SelectError::PointOutsideImage { x: 10, y: 0, .. })));
        assert!(found.is_empty());
    }
}
