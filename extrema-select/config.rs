use std::str::FromStr;

use crate::error::{SelectError, SelectResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Built-in policies for enforcing a maximum feature count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectorType {
    /// Highest scoring features, see [`crate::SelectNBest`]
    #[default]
    BestN,
    /// Best features per grid cell, round robin, see [`crate::SelectUniformBest`]
    UniformBest,
    /// Seeded random sample, see [`crate::SelectRandom`]
    Random,
    /// First features in detection order, see [`crate::SelectFirst`]
    First,
}

impl SelectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorType::BestN => "best_n",
            SelectorType::UniformBest => "uniform_best",
            SelectorType::Random => "random",
            SelectorType::First => "first",
        }
    }
}

impl FromStr for SelectorType {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "best_n" | "best" => Ok(SelectorType::BestN),
            "uniform_best" | "uniform" => Ok(SelectorType::UniformBest),
            "random" => Ok(SelectorType::Random),
            "first" | "first_n" => Ok(SelectorType::First),
            _ => Err(SelectError::UnknownSelector(s.to_string())),
        }
    }
}

impl std::fmt::Display for SelectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell sizing for the uniform grid selector
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridUniformConfig {
    /// Divides the cell side of an even one-feature-per-cell spread, so the
    /// grid holds about `limit * inverse_region_scale^2` cells.
    /// Smaller values give larger cells.
    pub inverse_region_scale: f64,
    /// Cells never get smaller than this many pixels per side
    pub min_cell_length: usize,
}

impl Default for GridUniformConfig {
    fn default() -> Self {
        Self {
            inverse_region_scale: 0.5,
            min_cell_length: 5,
        }
    }
}

impl GridUniformConfig {
    /// Cell side length for selecting `limit` features in a `width x height` image.
    ///
    /// A cell holding one feature at an even spread has side
    /// `sqrt(width * height / limit)`; that side is divided by
    /// `inverse_region_scale` and clamped to `min_cell_length`.
    pub fn select_target_cell_size(&self, limit: usize, width: usize, height: usize) -> usize {
        let limit = limit.max(1) as f64;
        let side = ((width * height) as f64 / limit).sqrt() / self.inverse_region_scale;
        (side as usize).max(self.min_cell_length).max(1)
    }

    pub fn validate(&self) -> SelectResult<()> {
        if !self.inverse_region_scale.is_finite() || self.inverse_region_scale <= 0.0 {
            return Err(SelectError::InvalidRegionScale(self.inverse_region_scale));
        }
        if self.min_cell_length == 0 {
            return Err(SelectError::InvalidMinCellLength(self.min_cell_length));
        }
        Ok(())
    }
}

/// Which selector to build and how
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    pub selector_type: SelectorType,
    /// Seed used by the random selector
    pub random_seed: u64,
    /// Used by the uniform selector
    pub uniform: GridUniformConfig,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            selector_type: SelectorType::BestN,
            random_seed: 0xDEAD_BEEF,
            uniform: GridUniformConfig::default(),
        }
    }
}

impl SelectorConfig {
    pub fn new(selector_type: SelectorType, random_seed: u64) -> Self {
        Self {
            selector_type,
            random_seed,
            ..Self::default()
        }
    }

    pub fn best_n() -> Self {
        Self::new(SelectorType::BestN, 0)
    }

    pub fn random(seed: u64) -> Self {
        Self::new(SelectorType::Random, seed)
    }

    pub fn first() -> Self {
        Self::new(SelectorType::First, 0)
    }

    pub fn uniform(inverse_region_scale: f64) -> Self {
        let mut config = Self::new(SelectorType::UniformBest, 0);
        config.uniform.inverse_region_scale = inverse_region_scale;
        config
    }

    pub fn validate(&self) -> SelectResult<()> {
        if self.selector_type == SelectorType::UniformBest {
            self.uniform.validate()?;
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        match self.selector_type {
            SelectorType::Random => format!("SelectorConfig: random, seed={:#x}", self.random_seed),
            SelectorType::UniformBest => format!(
                "SelectorConfig: uniform_best, inverse_region_scale={}, min_cell_length={}",
                self.uniform.inverse_region_scale, self.uniform.min_cell_length
            ),
            other => format!("SelectorConfig: {}", other),
        }
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
