use extrema_core::{IntensityImage, Point};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SelectorType;
use crate::error::SelectResult;
use crate::scoring::Polarity;
use crate::selector::{pass_through, FeatureSelector};

/// Keeps a uniformly random subset of `limit` features.
///
/// The generator is seeded once, so a fresh selector with the same seed fed
/// the same calls produces the same output. Kept features retain their
/// detection order.
#[derive(Debug)]
pub struct SelectRandom {
    rng: StdRng,
    indices: Vec<usize>,
}

impl SelectRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            indices: Vec::new(),
        }
    }

    /// Restarts the random sequence from `seed`
    pub fn reset_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl FeatureSelector for SelectRandom {
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

        self.indices.clear();
        self.indices.extend(0..detected.len());
        let (chosen, _) = self.indices.partial_shuffle(&mut self.rng, limit);
        chosen.sort_unstable();

        selected.extend(chosen.iter().map(|&i| detected[i]));
        debug!("random kept {} of {} features", selected.len(), detected.len());
        Ok(())
    }

    fn selector_type(&self) -> SelectorType {
        SelectorType::Random
    }
}
