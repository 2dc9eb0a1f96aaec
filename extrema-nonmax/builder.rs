use crate::candidate::{ExtremumVerifier, NonMaxCandidate};
use crate::config::NonMaxConfig;
use crate::error::NonMaxResult;
use crate::parallel::NonMaxCandidateParallel;

/// Fluent builder for extremum verifiers
#[derive(Debug, Clone, Default)]
pub struct NonMaxBuilder {
    config: NonMaxConfig,
}

impl NonMaxBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the half-width of the search window
    pub fn radius(mut self, radius: i32) -> Self {
        self.config.radius = radius;
        self
    }

    /// Set the border margin excluded on every image edge
    pub fn ignore_border(mut self, border: usize) -> Self {
        self.config.ignore_border = border;
        self
    }

    /// Set the acceptance threshold for minimum candidates
    pub fn threshold_min(mut self, threshold: f32) -> Self {
        self.config.threshold_min = threshold;
        self
    }

    /// Set the acceptance threshold for maximum candidates
    pub fn threshold_max(mut self, threshold: f32) -> Self {
        self.config.threshold_max = threshold;
        self
    }

    /// Reject (true) or tolerate (false) ties inside the window
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Set the smallest block of candidates scanned by one worker
    pub fn min_block_size(mut self, size: usize) -> Self {
        self.config.min_block_size = size;
        self
    }

    pub fn build_sequential(self) -> NonMaxResult<NonMaxCandidate> {
        NonMaxCandidate::new(self.config)
    }

    pub fn build_parallel(self) -> NonMaxResult<NonMaxCandidateParallel> {
        NonMaxCandidateParallel::new(self.config)
    }

    /// Build either flavour behind the common trait
    pub fn build(self, parallel: bool) -> NonMaxResult<Box<dyn ExtremumVerifier>> {
        if parallel {
            Ok(Box::new(self.build_parallel()?))
        } else {
            Ok(Box::new(self.build_sequential()?))
        }
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.config.summary()
    }

    /// Create a builder from an existing `NonMaxConfig`
    pub fn from_config(config: NonMaxConfig) -> Self {
        Self { config }
    }

    /// Convert the builder into a `NonMaxConfig`
    pub fn to_config(self) -> NonMaxConfig {
        self.config
    }
}
