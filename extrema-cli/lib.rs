use std::path::Path;

use extrema_core::{default_thread_count, CoreError, IntensityImage, Point};
use extrema_nonmax::{ExtremumVerifier, NonMaxBuilder, NonMaxConfig, NonMaxError};
use extrema_select::{create_selector, FeatureSelector, Polarity, SelectError, SelectorConfig};
use image::GrayImage;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Verifier error: {0}")]
    NonMax(#[from] NonMaxError),

    #[error("Selector error: {0}")]
    Select(#[from] SelectError),

    #[error("Image error: {0}")]
    Core(#[from] CoreError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Settings for the whole post-processing stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Features kept per pass
    pub max_features: usize,
    /// Worker threads for the parallel verifier
    pub n_threads: usize,
    /// Use the block-parallel verifier
    pub parallel: bool,
    pub nonmax: NonMaxConfig,
    pub selector: SelectorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_features: 500,
            n_threads: default_thread_count(),
            parallel: true,
            nonmax: NonMaxConfig::default(),
            selector: SelectorConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        self.nonmax.validate()?;
        self.selector.validate()?;
        if self.n_threads == 0 {
            return Err(PipelineError::InvalidConfig("n_threads must be > 0".to_string()));
        }
        Ok(())
    }

    pub fn from_toml(toml_str: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> PipelineResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_toml<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> PipelineResult<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} | {} | max_features={}, threads={}, parallel={}",
            self.nonmax.summary(),
            self.selector.summary(),
            self.max_features,
            self.n_threads,
            self.parallel
        )
    }
}

/// Extremum verification followed by feature limiting
pub struct PostProcessor {
    config: PipelineConfig,
    verifier: Box<dyn ExtremumVerifier>,
    selector: Box<dyn FeatureSelector>,
    pool: rayon::ThreadPool,
    found: Vec<Point>,
    // features kept by the previous pass, handed to the selector as prior
    previous: Vec<Point>,
}

impl PostProcessor {
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let verifier = NonMaxBuilder::from_config(config.nonmax.clone()).build(config.parallel)?;
        let selector = create_selector(&config.selector)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.n_threads)
            .build()?;

        Ok(Self {
            config,
            verifier,
            selector,
            pool,
            found: Vec::new(),
            previous: Vec::new(),
        })
    }

    /// Bright features: local maxima, larger intensity is better
    pub fn run_maximum(&mut self, image: &IntensityImage, candidates: &[Point]) -> PipelineResult<Vec<Point>> {
        self.run(image, candidates, Polarity::Positive)
    }

    /// Dark features: local minima, more negative intensity is better
    pub fn run_minimum(&mut self, image: &IntensityImage, candidates: &[Point]) -> PipelineResult<Vec<Point>> {
        self.run(image, candidates, Polarity::Negative)
    }

    fn run(&mut self, image: &IntensityImage, candidates: &[Point], polarity: Polarity) -> PipelineResult<Vec<Point>> {
        let verifier = &mut self.verifier;
        let found = &mut self.found;
        self.pool.install(|| match polarity {
            Polarity::Positive => verifier.examine_maximum(image, candidates, found),
            Polarity::Negative => verifier.examine_minimum(image, candidates, found),
        })?;

        let mut selected = Vec::new();
        self.selector.select(
            image,
            polarity,
            Some(self.previous.as_slice()),
            &self.found,
            self.config.max_features,
            &mut selected,
        )?;
        debug!(
            "{:?} pass: {} candidates, {} extrema, {} kept",
            polarity,
            candidates.len(),
            self.found.len(),
            selected.len()
        );

        self.previous.clone_from(&selected);
        Ok(selected)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

/// Luminance scaled to `[0, 1]` as an intensity image
pub fn intensity_from_luma(img: &GrayImage) -> PipelineResult<IntensityImage> {
    let (w, h) = img.dimensions();
    let data = img.as_raw().iter().map(|&v| v as f32 / 255.0).collect();
    Ok(IntensityImage::from_vec(w as usize, h as usize, data)?)
}

/// Every pixel of a `width x height` image, row by row
pub fn all_pixels(width: usize, height: usize) -> Vec<Point> {
    (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| Point::new(x, y)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrema_select::SelectorType;

    fn scene() -> IntensityImage {
        let mut img = IntensityImage::new(64, 48);
        // a crowded bright cluster in the top-left and a few isolated peaks
        for i in 0..6 {
            img.set(4 + 4 * i, 4, 50.0 + i as f32);
        }
        img.set(50, 10, 5.0);
        img.set(10, 40, 6.0);
        img.set(55, 40, 7.0);
        img.set(30, 30, -9.0);
        img
    }

    fn config(selector: SelectorConfig, parallel: bool) -> PipelineConfig {
        PipelineConfig {
            nonmax: NonMaxConfig::new(1).with_border(1),
            selector,
            max_features: 4,
            n_threads: 3,
            parallel,
        }
    }

    #[test]
    fn test_maximum_pipeline_best_n() {
        let img = scene();
        let candidates = all_pixels(64, 48);
        let mut pp = PostProcessor::new(config(SelectorConfig::best_n(), false)).unwrap();

        let kept = pp.run_maximum(&img, &candidates).unwrap();
        assert_eq!(
            kept,
            vec![Point::new(24, 4), Point::new(20, 4), Point::new(16, 4), Point::new(12, 4)]
        );
    }

    #[test]
    fn test_uniform_spreads_features() {
        let img = scene();
        let candidates = all_pixels(64, 48);
        let mut pp = PostProcessor::new(config(SelectorConfig::uniform(0.5), true)).unwrap();

        // 55px cells: the right-hand cell only holds the weak peak at (55, 40)
        let kept = pp.run_maximum(&img, &candidates).unwrap();
        assert_eq!(
            kept,
            vec![Point::new(24, 4), Point::new(55, 40), Point::new(20, 4), Point::new(16, 4)]
        );
    }

    #[test]
    fn test_minimum_pipeline() {
        let img = scene();
        let candidates = all_pixels(64, 48);
        let mut pp = PostProcessor::new(config(SelectorConfig::first(), true)).unwrap();

        let kept = pp.run_minimum(&img, &candidates).unwrap();
        assert_eq!(kept, vec![Point::new(30, 30)]);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let img = scene();
        let candidates = all_pixels(64, 48);
        let mut outputs = Vec::new();
        for parallel in [false, true] {
            let mut cfg = config(SelectorConfig::random(5), parallel);
            cfg.max_features = 6;
            let mut pp = PostProcessor::new(cfg).unwrap();
            outputs.push(pp.run_maximum(&img, &candidates).unwrap());
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_invalid_configuration() {
        let mut cfg = PipelineConfig::default();
        cfg.n_threads = 0;
        assert!(matches!(PostProcessor::new(cfg), Err(PipelineError::InvalidConfig(_))));

        let mut cfg = PipelineConfig::default();
        cfg.nonmax.radius = -1;
        assert!(matches!(
            PostProcessor::new(cfg),
            Err(PipelineError::NonMax(NonMaxError::InvalidRadius(-1)))
        ));
    }

    #[test]
    fn test_empty_image_is_reported() {
        let mut pp = PostProcessor::new(config(SelectorConfig::best_n(), true)).unwrap();
        let result = pp.run_maximum(&IntensityImage::new(0, 0), &[]);
        assert!(matches!(result, Err(PipelineError::NonMax(NonMaxError::EmptyImage { .. }))));
    }

    #[test]
    fn test_toml_config() {
        let cfg = PipelineConfig::from_toml(
            r#"
max_features = 50
parallel = false

[nonmax]
radius = 3
ignore_border = 2

[selector]
selector_type = "random"
random_seed = 11
"#,
        )
        .unwrap();
        assert_eq!(cfg.max_features, 50);
        assert!(!cfg.parallel);
        assert_eq!(cfg.nonmax.radius, 3);
        assert_eq!(cfg.nonmax.ignore_border, 2);
        assert_eq!(cfg.selector.selector_type, SelectorType::Random);
        assert_eq!(cfg.selector.random_seed, 11);

        let text = cfg.to_toml().unwrap();
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), cfg);

        let bad = PipelineConfig::from_toml("[nonmax]\nradius = -4\n");
        assert!(matches!(bad, Err(PipelineError::NonMax(NonMaxError::InvalidRadius(-4)))));
    }

    #[test]
    fn test_intensity_from_luma() {
        let img = GrayImage::from_raw(2, 2, vec![0, 255, 51, 102]).unwrap();
        let intensity = intensity_from_luma(&img).unwrap();
        assert_eq!(intensity.width(), 2);
        assert_eq!(intensity.get(1, 0), Some(1.0));
        assert_eq!(intensity.get(0, 1), Some(0.2));
    }
}
