//! Loading the serialized classifier.
//!
//! The artifact is a JSON document written by the training pipeline:
//! - `format_version`: currently `1`
//! - `trained_with`: free-form toolchain note (logged, never interpreted)
//! - `feature_names`: optional column layout the model was trained on
//! - `model`: the classifier itself, tagged by `kind`

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{FeatureVector, Label};
use crate::error::{InferenceError, ModelLoadError};
use crate::models::Classifier;
use crate::models::forest::RandomForest;
use crate::models::logistic::LogisticModel;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    RandomForest(RandomForest),
    Logistic(LogisticModel),
}

impl ModelSpec {
    pub fn n_features(&self) -> usize {
        match self {
            ModelSpec::RandomForest(m) => m.n_features,
            ModelSpec::Logistic(m) => m.n_features,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            ModelSpec::RandomForest(m) => format!("random forest ({} trees)", m.trees.len()),
            ModelSpec::Logistic(_) => "logistic regression".to_string(),
        }
    }
}

/// On-disk schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub format_version: u32,
    #[serde(default)]
    pub trained_with: Option<String>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub model: ModelSpec,
}

/// Outcome of comparing the artifact's recorded layout with the encoder's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutCheck {
    /// The artifact does not record feature names.
    Unrecorded,
    Matches,
    Mismatch {
        /// First column index where the names differ (or where one list ends).
        first_difference: usize,
        expected: usize,
        recorded: usize,
    },
}

/// A loaded, validated, immutable classifier.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    file: ArtifactFile,
}

impl ModelArtifact {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let file = File::open(path).map_err(|source| ModelLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: ArtifactFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let artifact = Self::from_file(parsed)?;

        info!(
            path = %path.display(),
            model = %artifact.file.model.display_name(),
            n_features = artifact.input_width(),
            trained_with = artifact.trained_with().unwrap_or("unknown"),
            "loaded model artifact"
        );
        Ok(artifact)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelLoadError> {
        let parsed: ArtifactFile = serde_json::from_str(json).map_err(|source| ModelLoadError::Parse {
            path: "<inline>".into(),
            source,
        })?;
        Self::from_file(parsed)
    }

    pub fn from_file(file: ArtifactFile) -> Result<Self, ModelLoadError> {
        if file.format_version != FORMAT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                found: file.format_version,
                expected: FORMAT_VERSION,
            });
        }
        let validated = match &file.model {
            ModelSpec::RandomForest(m) => m.validate(),
            ModelSpec::Logistic(m) => m.validate(),
        };
        validated.map_err(ModelLoadError::Invalid)?;

        if let Some(names) = &file.feature_names {
            if names.len() != file.model.n_features() {
                return Err(ModelLoadError::Invalid(format!(
                    "{} feature names recorded for a model with n_features={}",
                    names.len(),
                    file.model.n_features()
                )));
            }
        }
        Ok(Self { file })
    }

    pub fn trained_with(&self) -> Option<&str> {
        self.file.trained_with.as_deref()
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.file.model
    }

    /// Compare the recorded training layout with `columns`.
    pub fn check_layout(&self, columns: &[String]) -> LayoutCheck {
        let Some(recorded) = &self.file.feature_names else {
            return LayoutCheck::Unrecorded;
        };
        let first_difference = recorded
            .iter()
            .zip(columns)
            .position(|(a, b)| a != b)
            .or_else(|| (recorded.len() != columns.len()).then(|| recorded.len().min(columns.len())));
        match first_difference {
            None => LayoutCheck::Matches,
            Some(first_difference) => LayoutCheck::Mismatch {
                first_difference,
                expected: columns.len(),
                recorded: recorded.len(),
            },
        }
    }

    /// Log the compatibility note for the encoder's column layout.
    pub fn log_compatibility(&self, columns: &[String]) {
        match self.check_layout(columns) {
            LayoutCheck::Unrecorded => info!("model artifact does not record feature names; layout not checked"),
            LayoutCheck::Matches => info!(columns = columns.len(), "model feature layout matches encoder"),
            LayoutCheck::Mismatch {
                first_difference,
                expected,
                recorded,
            } => warn!(
                first_difference,
                encoder_columns = expected,
                model_columns = recorded,
                "model feature layout differs from encoder; predictions may fail or be wrong"
            ),
        }
    }
}

impl Classifier for ModelArtifact {
    fn input_width(&self) -> usize {
        self.file.model.n_features()
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label, InferenceError> {
        let expected = self.input_width();
        if features.len() != expected {
            return Err(InferenceError::ShapeMismatch {
                expected,
                actual: features.len(),
            });
        }
        let x = features.as_slice();
        if let Some((index, value)) = x.iter().copied().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InferenceError::NonFinite { index, value });
        }

        let class = match &self.file.model {
            ModelSpec::RandomForest(m) => m.predict_class(x),
            ModelSpec::Logistic(m) => m.predict_class(x),
        };
        Ok(Label::from_class(class))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const STUMP: &str = r#"{
        "format_version": 1,
        "trained_with": "scikit-learn 1.3.2",
        "model": {
            "kind": "random_forest",
            "n_features": 2,
            "classes": [0, 1],
            "trees": [
                { "nodes": [
                    { "split": { "feature": 1, "threshold": 10.0, "left": 1, "right": 2 } },
                    { "leaf": { "value": [5.0, 1.0] } },
                    { "leaf": { "value": [1.0, 5.0] } }
                ] }
            ]
        }
    }"#;

    #[test]
    fn loads_forest_and_predicts() {
        let model = ModelArtifact::from_json_str(STUMP).unwrap();
        assert_eq!(model.input_width(), 2);
        assert_eq!(model.trained_with(), Some("scikit-learn 1.3.2"));
        assert_eq!(
            model.predict(&FeatureVector::new(vec![0.0, 11.0])).unwrap(),
            Label::AboveThreshold
        );
        assert_eq!(
            model.predict(&FeatureVector::new(vec![0.0, 1.0])).unwrap(),
            Label::BelowThreshold
        );
    }

    #[test]
    fn wrong_width_is_inference_error() {
        let model = ModelArtifact::from_json_str(STUMP).unwrap();
        let err = model.predict(&FeatureVector::new(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(err, InferenceError::ShapeMismatch { expected: 2, actual: 3 });
        assert!(err.to_string().contains("expects 2"));
    }

    #[test]
    fn nan_is_inference_error() {
        let model = ModelArtifact::from_json_str(STUMP).unwrap();
        let err = model.predict(&FeatureVector::new(vec![f64::NAN, 2.0])).unwrap_err();
        assert!(matches!(err, InferenceError::NonFinite { index: 0, .. }));
    }

    #[test]
    fn logistic_artifact() {
        let json = r#"{
            "format_version": 1,
            "model": { "kind": "logistic", "n_features": 2, "coefficients": [1.0, 0.0], "intercept": -5.0 }
        }"#;
        let model = ModelArtifact::from_json_str(json).unwrap();
        assert_eq!(model.predict(&FeatureVector::new(vec![6.0, 0.0])).unwrap(), Label::AboveThreshold);
        assert_eq!(model.predict(&FeatureVector::new(vec![4.0, 0.0])).unwrap(), Label::BelowThreshold);
    }

    #[test]
    fn missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ModelLoadError::Open { .. }));
    }

    #[test]
    fn corrupt_file_is_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x80\x04\x95joblib-pickle").unwrap();
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse { .. }));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STUMP.as_bytes()).unwrap();
        let model = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(model.input_width(), 2);
    }

    #[test]
    fn rejects_unknown_version_and_bad_trees() {
        let json = STUMP.replace("\"format_version\": 1", "\"format_version\": 7");
        assert!(matches!(
            ModelArtifact::from_json_str(&json).unwrap_err(),
            ModelLoadError::UnsupportedVersion { found: 7, .. }
        ));

        let json = STUMP.replace("\"right\": 2", "\"right\": 9");
        assert!(matches!(
            ModelArtifact::from_json_str(&json).unwrap_err(),
            ModelLoadError::Invalid(_)
        ));
    }

    #[test]
    fn layout_check_reports_first_difference() {
        let json = STUMP.replace(
            "\"trained_with\"",
            "\"feature_names\": [\"age\", \"fnlwgt\"], \"trained_with\"",
        );
        let model = ModelArtifact::from_json_str(&json).unwrap();
        assert_eq!(
            model.check_layout(&["age".to_string(), "fnlwgt".to_string()]),
            LayoutCheck::Matches
        );
        assert_eq!(
            model.check_layout(&["age".to_string(), "education-num".to_string()]),
            LayoutCheck::Mismatch {
                first_difference: 1,
                expected: 2,
                recorded: 2
            }
        );
        assert_eq!(
            model.check_layout(&["age".to_string()]),
            LayoutCheck::Mismatch {
                first_difference: 1,
                expected: 1,
                recorded: 2
            }
        );

        let plain = ModelArtifact::from_json_str(STUMP).unwrap();
        assert_eq!(plain.check_layout(&[]), LayoutCheck::Unrecorded);
    }
}
