//! Feature limiting policies.
//!
//! When a detector reports more features than a caller allows, a
//! [`FeatureSelector`] picks which ones to keep. Every policy returns the
//! detected list unchanged when it already fits the limit.

mod best_n;
mod config;
mod error;
mod factory;
mod first;
mod grid;
mod random;
mod scoring;
mod selector;
mod uniform;

pub use best_n::SelectNBest;
pub use config::{GridUniformConfig, SelectorConfig, SelectorType};
pub use error::{SelectError, SelectResult};
pub use factory::create_selector;
pub use first::SelectFirst;
pub use grid::ImageGrid;
pub use random::SelectRandom;
pub use scoring::Polarity;
pub use selector::FeatureSelector;
pub use uniform::SelectUniformBest;
