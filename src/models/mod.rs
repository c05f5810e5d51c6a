//! Classifier artifacts.
//!
//! The pipeline only depends on the `Classifier` trait, so front-ends and tests
//! can pass in any implementation. `ModelArtifact` is the one loaded from disk.

use crate::domain::{FeatureVector, Label};
use crate::error::InferenceError;

pub mod artifact;
pub mod forest;
pub mod logistic;

pub use artifact::*;

/// A read-only binary classifier, shareable across threads without locking.
pub trait Classifier: Send + Sync {
    /// Number of feature columns the classifier was trained on.
    fn input_width(&self) -> usize;

    fn predict(&self, features: &FeatureVector) -> Result<Label, InferenceError>;
}
