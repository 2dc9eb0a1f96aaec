use extrema_core::IntensityImage;

use crate::types::Window;

/// Decides whether the center pixel of a window is its extremum.
///
/// Each parallel worker gets its own instance through [`WindowSearch::new_instance`];
/// instances are never shared between threads.
pub trait WindowSearch: Send {
    /// True if `value` at data offset `center` is the minimum of `window`
    fn search_min(&mut self, image: &IntensityImage, window: &Window, center: usize, value: f32) -> bool;

    /// True if `value` at data offset `center` is the maximum of `window`
    fn search_max(&mut self, image: &IntensityImage, window: &Window, center: usize, value: f32) -> bool;

    /// Fresh, independent instance with the same behavior
    fn new_instance(&self) -> Box<dyn WindowSearch>;

    fn name(&self) -> &'static str;
}

/// The candidate must beat every other pixel in the window; ties reject.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictSearch;

impl WindowSearch for StrictSearch {
    fn search_min(&mut self, image: &IntensityImage, window: &Window, center: usize, value: f32) -> bool {
        let data = image.data();
        for y in window.y0..window.y1 {
            let row = image.index(window.x0, y);
            for index in row..row + (window.x1 - window.x0) {
                if index != center && data[index] <= value {
                    return false;
                }
            }
        }
        true
    }

    fn search_max(&mut self, image: &IntensityImage, window: &Window, center: usize, value: f32) -> bool {
        let data = image.data();
        for y in window.y0..window.y1 {
            let row = image.index(window.x0, y);
            for index in row..row + (window.x1 - window.x0) {
                if index != center && data[index] >= value {
                    return false;
                }
            }
        }
        true
    }

    fn new_instance(&self) -> Box<dyn WindowSearch> {
        Box::new(StrictSearch)
    }

    fn name(&self) -> &'static str {
        "strict"
    }
}

/// Ties with the candidate are tolerated; only a strictly better pixel rejects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxedSearch;

impl WindowSearch for RelaxedSearch {
    fn search_min(&mut self, image: &IntensityImage, window: &Window, _center: usize, value: f32) -> bool {
        let data = image.data();
        for y in window.y0..window.y1 {
            let row = image.index(window.x0, y);
            if data[row..row + (window.x1 - window.x0)].iter().any(|&v| v < value) {
                return false;
            }
        }
        true
    }

    fn search_max(&mut self, image: &IntensityImage, window: &Window, _center: usize, value: f32) -> bool {
        let data = image.data();
        for y in window.y0..window.y1 {
            let row = image.index(window.x0, y);
            if data[row..row + (window.x1 - window.x0)].iter().any(|&v| v > value) {
                return false;
            }
        }
        true
    }

    fn new_instance(&self) -> Box<dyn WindowSearch> {
        Box::new(RelaxedSearch)
    }

    fn name(&self) -> &'static str {
        "relaxed"
    }
}

/// Search flavour selected by the `strict` configuration flag
pub fn search_for(strict: bool) -> Box<dyn WindowSearch> {
    if strict {
        Box::new(StrictSearch)
    } else {
        Box::new(RelaxedSearch)
    }
}
