#![warn(missing_docs)]

//! Core library for imtheme => See `imtheme` crate.
//!
//! Contains the variant-aware theme randomizer and its sampling policy.

/// Contains the [randomizer::Randomizer] and the [randomizer::SamplingPolicy] table.
pub mod randomizer;

pub use randomizer::{randomize, Randomizer};
