//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - attribute enums (`NumericAttribute`, `CategoricalAttribute`) and their form bounds
//! - the raw submission (`AttributeRecord`)
//! - encoder / classifier values (`FeatureVector`, `Label`)

pub mod types;

pub use types::*;
