use crate::error::{NonMaxError, NonMaxResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for candidate extremum verification
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NonMaxConfig {
    /// Half-width of the square search window
    pub radius: i32,
    /// Pixels closer than this to any image edge are never accepted
    pub ignore_border: usize,
    /// Minimum candidates with a value above this are rejected
    pub threshold_min: f32,
    /// Maximum candidates with a value below this are rejected
    pub threshold_max: f32,
    /// Reject candidates that tie with a neighbour
    pub strict: bool,
    /// Smallest block of candidates handed to one parallel worker
    pub min_block_size: usize,
}

impl Default for NonMaxConfig {
    fn default() -> Self {
        Self {
            radius: 2,
            ignore_border: 0,
            threshold_min: f32::MAX,
            threshold_max: -f32::MAX,
            strict: true,
            min_block_size: 64,
        }
    }
}

impl NonMaxConfig {
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Ties reject; the usual choice for corner detectors
    pub fn strict_preset(radius: i32) -> Self {
        Self {
            radius,
            strict: true,
            ..Self::default()
        }
    }

    /// Ties accepted; useful on quantized intensity images with flat peaks
    pub fn relaxed_preset(radius: i32) -> Self {
        Self {
            radius,
            strict: false,
            ..Self::default()
        }
    }

    pub fn with_border(mut self, ignore_border: usize) -> Self {
        self.ignore_border = ignore_border;
        self
    }

    pub fn with_thresholds(mut self, threshold_min: f32, threshold_max: f32) -> Self {
        self.threshold_min = threshold_min;
        self.threshold_max = threshold_max;
        self
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "NonMaxConfig: radius={}, border={}, thresholds=[min:{}, max:{}], search={}, min_block={}",
            self.radius,
            self.ignore_border,
            self.threshold_min,
            self.threshold_max,
            if self.strict { "strict" } else { "relaxed" },
            self.min_block_size
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> NonMaxResult<()> {
        if self.radius < 0 {
            return Err(NonMaxError::InvalidRadius(self.radius));
        }
        if self.min_block_size == 0 {
            return Err(NonMaxError::InvalidBlockSize(self.min_block_size));
        }
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
