use extrema_core::{IntensityImage, Point};

use crate::config::SelectorType;
use crate::error::SelectResult;
use crate::scoring::Polarity;
use crate::selector::{pass_through, FeatureSelector};

/// Keeps the first `limit` features in detection order; no scoring
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectFirst;

impl FeatureSelector for SelectFirst {
    fn select(
        &mut self,
        _intensity: &IntensityImage,
        _polarity: Polarity,
        _prior: Option<&[Point]>,
        detected: &[Point],
        limit: usize,
        selected: &mut Vec<Point>,
    ) -> SelectResult<()> {
        if pass_through(detected, limit, selected) {
            return Ok(());
        }
        selected.extend_from_slice(&detected[..limit]);
        Ok(())
    }

    fn selector_type(&self) -> SelectorType {
        SelectorType::First
    }
}
