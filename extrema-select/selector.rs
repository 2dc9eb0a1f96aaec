use extrema_core::{IntensityImage, Point};

use crate::config::SelectorType;
use crate::error::SelectResult;
use crate::scoring::Polarity;

/// Resolves which features to keep when more were detected than allowed.
pub trait FeatureSelector: Send {
    /// Selects at most `limit` features out of `detected`.
    ///
    /// * `intensity` - intensity image the features were detected in
    /// * `polarity` - whether larger or more negative values are better
    /// * `prior` - features accepted earlier; informational only
    /// * `detected` - newly detected features
    /// * `selected` - output, cleared on every call, never longer than `limit`
    ///
    /// When `detected.len() <= limit` the output is `detected` unchanged.
    fn select(
        &mut self,
        intensity: &IntensityImage,
        polarity: Polarity,
        prior: Option<&[Point]>,
        detected: &[Point],
        limit: usize,
        selected: &mut Vec<Point>,
    ) -> SelectResult<()>;

    fn selector_type(&self) -> SelectorType;
}

/// Clears `selected` and, when everything fits, copies `detected` into it.
/// Returns true if the caller has nothing left to do.
pub(crate) fn pass_through(detected: &[Point], limit: usize, selected: &mut Vec<Point>) -> bool {
    selected.clear();
    if detected.len() <= limit {
        selected.extend_from_slice(detected);
        return true;
    }
    limit == 0
}
