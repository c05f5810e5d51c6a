//! Shared "predict" pipeline used by the form and the scripting commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! attribute record -> encode -> classify -> rendered message
//!
//! Front-ends then only decide how to collect records and show the message.

use tracing::{info, warn};

use crate::domain::{AttributeRecord, FeatureVector, Label};
use crate::encoding::FeatureEncoder;
use crate::error::InferenceError;
use crate::models::Classifier;
use crate::report::RenderedOutcome;

/// Everything computed for one submission.
#[derive(Debug, Clone)]
pub struct PredictionRun {
    pub features: FeatureVector,
    pub outcome: Result<Label, InferenceError>,
}

impl PredictionRun {
    pub fn render(&self) -> RenderedOutcome {
        RenderedOutcome::from_result(&self.outcome)
    }
}

/// Encoder plus classifier, both injected by the caller.
pub struct Predictor<'a> {
    encoder: &'a FeatureEncoder,
    classifier: &'a dyn Classifier,
}

impl<'a> Predictor<'a> {
    pub fn new(encoder: &'a FeatureEncoder, classifier: &'a dyn Classifier) -> Self {
        Self { encoder, classifier }
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        self.encoder
    }

    /// Encode and classify one record. Never panics; inference problems come
    /// back in `PredictionRun::outcome`.
    pub fn run(&self, record: &AttributeRecord) -> PredictionRun {
        let features = self.encoder.encode(record);
        let outcome = self.classifier.predict(&features);
        match &outcome {
            Ok(label) => info!(label = %label, "prediction succeeded"),
            Err(err) => warn!(error = %err, "prediction failed"),
        }
        PredictionRun { features, outcome }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Classifier returning a fixed class, used to exercise front-ends.
    pub struct FixedClassifier {
        pub width: usize,
        pub class: i64,
    }

    impl Classifier for FixedClassifier {
        fn input_width(&self) -> usize {
            self.width
        }

        fn predict(&self, features: &FeatureVector) -> Result<Label, InferenceError> {
            if features.len() != self.width {
                return Err(InferenceError::ShapeMismatch {
                    expected: self.width,
                    actual: features.len(),
                });
            }
            Ok(Label::from_class(self.class))
        }
    }
}
