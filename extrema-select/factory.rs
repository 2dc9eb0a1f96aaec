use log::debug;

use crate::best_n::SelectNBest;
use crate::config::{SelectorConfig, SelectorType};
use crate::error::SelectResult;
use crate::first::SelectFirst;
use crate::random::SelectRandom;
use crate::selector::FeatureSelector;
use crate::uniform::SelectUniformBest;

/// Creates the selector named by `config.selector_type`
pub fn create_selector(config: &SelectorConfig) -> SelectResult<Box<dyn FeatureSelector>> {
    config.validate()?;
    debug!("creating selector: {}", config.summary());
    let selector: Box<dyn FeatureSelector> = match config.selector_type {
        SelectorType::BestN => Box::new(SelectNBest::new()),
        SelectorType::UniformBest => Box::new(SelectUniformBest::new(config.uniform.clone())?),
        SelectorType::Random => Box::new(SelectRandom::new(config.random_seed)),
        SelectorType::First => Box::new(SelectFirst),
    };
    Ok(selector)
}
