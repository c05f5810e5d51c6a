use std::path::PathBuf;

use thiserror::Error;

/// Exit code for usage, configuration, and input-file problems.
pub const EXIT_INPUT: u8 = 2;
/// Exit code when the model artifact cannot be loaded.
pub const EXIT_MODEL_LOAD: u8 = 3;
/// Exit code for runtime failures (terminal I/O, one-shot inference).
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// The model artifact is missing or corrupt. Fatal: nothing can be predicted.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Failed to open model artifact '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact '{path}' is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported model artifact format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Corrupt model artifact: {0}")]
    Invalid(String),
}

/// Inference failed for one submission. Recoverable: the form stays usable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InferenceError {
    #[error("feature vector has {actual} columns but the model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("feature column {index} is not a finite number ({value})")]
    NonFinite { index: usize, value: f64 },
}

impl From<ModelLoadError> for AppError {
    fn from(err: ModelLoadError) -> Self {
        AppError::new(EXIT_MODEL_LOAD, err.to_string())
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::new(EXIT_RUNTIME, format!("Prediction failed: {err}"))
    }
}
