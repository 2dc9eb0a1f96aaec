use extrema_core::{IntensityImage, Point, EXCLUDED_MAXIMUM, EXCLUDED_MINIMUM};
use log::debug;

use crate::config::NonMaxConfig;
use crate::error::{NonMaxError, NonMaxResult};
use crate::search::{search_for, WindowSearch};
use crate::types::{ExtremumKind, Window};

/// Confirms or rejects candidate points as local extrema of an intensity image.
///
/// Every call clears its output first. Output order follows candidate order.
pub trait ExtremumVerifier: Send {
    fn examine_minimum(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()>;

    fn examine_maximum(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()>;

    /// Runs the minimum and/or maximum pass. A missing candidate list leaves
    /// its output empty.
    fn process(
        &mut self,
        image: &IntensityImage,
        candidates_min: Option<&[Point]>,
        candidates_max: Option<&[Point]>,
        found_min: &mut Vec<Point>,
        found_max: &mut Vec<Point>,
    ) -> NonMaxResult<()> {
        found_min.clear();
        found_max.clear();
        if let Some(candidates) = candidates_min {
            self.examine_minimum(image, candidates, found_min)?;
        }
        if let Some(candidates) = candidates_max {
            self.examine_maximum(image, candidates, found_max)?;
        }
        Ok(())
    }

    fn config(&self) -> &NonMaxConfig;
}

/// Clears the output and rejects inputs that cannot be scanned at all
pub(crate) fn begin_pass(image: &IntensityImage, found: &mut Vec<Point>) -> NonMaxResult<()> {
    found.clear();
    if image.is_empty() {
        return Err(NonMaxError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

/// Tests `candidates` in order and appends the confirmed ones to `out`.
///
/// Shared by the sequential and parallel verifiers so a single candidate is
/// judged identically by both.
pub(crate) fn examine_candidates(
    cfg: &NonMaxConfig,
    image: &IntensityImage,
    candidates: &[Point],
    kind: ExtremumKind,
    search: &mut dyn WindowSearch,
    out: &mut Vec<Point>,
) {
    let border = cfg.ignore_border as i64;
    let end_x = image.width() as i64 - border;
    let end_y = image.height() as i64 - border;
    let radius = cfg.radius.max(0) as usize;

    for &pt in candidates {
        let (x, y) = (pt.x as i64, pt.y as i64);
        if x < border || y < border || x >= end_x || y >= end_y {
            continue;
        }

        let (x, y) = (x as usize, y as usize);
        let center = image.index(x, y);
        let value = image.data()[center];

        let window = Window::around(image, x, y, radius);
        let accepted = match kind {
            ExtremumKind::Minimum => {
                if value > cfg.threshold_min || value == EXCLUDED_MINIMUM {
                    continue;
                }
                search.search_min(image, &window, center, value)
            }
            ExtremumKind::Maximum => {
                if value < cfg.threshold_max || value == EXCLUDED_MAXIMUM {
                    continue;
                }
                search.search_max(image, &window, center, value)
            }
        };

        if accepted {
            out.push(pt);
        }
    }
}

/// Single-threaded verifier reusing one search instance for every candidate
pub struct NonMaxCandidate {
    cfg: NonMaxConfig,
    search: Box<dyn WindowSearch>,
}

impl NonMaxCandidate {
    /// Creates a verifier using the search flavour named by `cfg.strict`
    pub fn new(cfg: NonMaxConfig) -> NonMaxResult<Self> {
        let search = search_for(cfg.strict);
        Self::with_search(cfg, search)
    }

    pub fn with_search(cfg: NonMaxConfig, search: Box<dyn WindowSearch>) -> NonMaxResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg, search })
    }

    fn examine(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        kind: ExtremumKind,
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()> {
        begin_pass(image, found)?;
        examine_candidates(&self.cfg, image, candidates, kind, self.search.as_mut(), found);
        debug!(
            "{:?} pass ({} search): {} of {} candidates confirmed",
            kind,
            self.search.name(),
            found.len(),
            candidates.len()
        );
        Ok(())
    }
}

impl ExtremumVerifier for NonMaxCandidate {
    fn examine_minimum(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()> {
        self.examine(image, candidates, ExtremumKind::Minimum, found)
    }

    fn examine_maximum(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()> {
        self.examine(image, candidates, ExtremumKind::Maximum, found)
    }

    fn config(&self) -> &NonMaxConfig {
        &self.cfg
    }
}
