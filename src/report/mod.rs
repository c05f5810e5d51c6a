//! Reporting utilities: user-facing prediction messages and formatted output.

use crate::domain::Label;
use crate::error::InferenceError;

pub mod format;

pub use format::*;

/// Prefix of every success message.
pub const SUCCESS_PREFIX: &str = "The predicted salary for the provided details is: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Error,
}

/// The single string shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutcome {
    pub kind: OutcomeKind,
    pub text: String,
}

impl RenderedOutcome {
    pub fn success(label: Label) -> Self {
        Self {
            kind: OutcomeKind::Success,
            text: format!("{SUCCESS_PREFIX}{label}"),
        }
    }

    pub fn failure(err: &InferenceError) -> Self {
        Self {
            kind: OutcomeKind::Error,
            text: format!("Prediction failed: {err}"),
        }
    }

    pub fn from_result(result: &Result<Label, InferenceError>) -> Self {
        match result {
            Ok(label) => Self::success(*label),
            Err(err) => Self::failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_messages_are_exact() {
        assert_eq!(
            RenderedOutcome::success(Label::AboveThreshold).text,
            "The predicted salary for the provided details is: >50K"
        );
        assert_eq!(
            RenderedOutcome::success(Label::BelowThreshold).text,
            "The predicted salary for the provided details is: <=50K"
        );
    }

    #[test]
    fn failure_carries_detail() {
        let err = InferenceError::ShapeMismatch {
            expected: 105,
            actual: 104,
        };
        let r = RenderedOutcome::failure(&err);
        assert_eq!(r.kind, OutcomeKind::Error);
        assert!(r.text.contains("104 columns"));
        assert!(r.text.contains("105"));
    }
}
