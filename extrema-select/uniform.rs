use extrema_core::{IntensityImage, Point};
use log::debug;

use crate::config::{GridUniformConfig, SelectorType};
use crate::error::SelectResult;
use crate::grid::ImageGrid;
use crate::scoring::{score_points, Polarity};
use crate::selector::{pass_through, FeatureSelector};

/// Spreads the kept features across the image.
///
/// The image is split into a grid sized from the limit. Every sweep over the
/// cells takes the best remaining feature of each non-empty cell, so no cell
/// contributes a second feature before every other cell has contributed one.
/// If the cells run dry before the limit is reached, fewer than `limit`
/// features are returned.
#[derive(Debug, Default)]
pub struct SelectUniformBest {
    config: GridUniformConfig,
    // cells hold indices into `detected`
    grid: ImageGrid<usize>,
    scores: Vec<f32>,
}

impl SelectUniformBest {
    pub fn new(config: GridUniformConfig) -> SelectResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: ImageGrid::new(),
            scores: Vec::new(),
        })
    }

    pub fn config(&self) -> &GridUniformConfig {
        &self.config
    }

    /// Grid used by the most recent selection
    pub fn grid(&self) -> &ImageGrid<usize> {
        &self.grid
    }

    /// Orders every cell so its most desirable feature sits at the tail.
    /// Equal scores put the earlier detection nearer the tail.
    fn sort_cells(&mut self) {
        let scores = &self.scores;
        for cell in self.grid.cells_mut() {
            cell.sort_unstable_by(|&a, &b| scores[a].total_cmp(&scores[b]).then(b.cmp(&a)));
        }
    }
}

impl FeatureSelector for SelectUniformBest {
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

        let (width, height) = (intensity.width(), intensity.height());
        let cell_length = self.config.select_target_cell_size(limit, width, height);
        self.grid.initialize(cell_length, width, height);

        // score_points guarantees every point is inside the image
        for (i, p) in detected.iter().enumerate() {
            self.grid.cell_at_pixel_mut(p.x as usize, p.y as usize).push(i);
        }
        self.sort_cells();

        let cells = self.grid.cells_mut();
        while selected.len() < limit {
            let before = selected.len();
            for cell in cells.iter_mut() {
                if selected.len() >= limit {
                    break;
                }
                if let Some(i) = cell.pop() {
                    selected.push(detected[i]);
                }
            }
            if before == selected.len() {
                break;
            }
        }

        debug!(
            "uniform kept {} of {} features, {}x{} grid of {}px cells",
            selected.len(),
            detected.len(),
            self.grid.cols(),
            self.grid.rows(),
            cell_length
        );
        Ok(())
    }

    fn selector_type(&self) -> SelectorType {
        SelectorType::UniformBest
    }
}
