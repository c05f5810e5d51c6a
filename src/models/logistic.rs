//! Logistic-regression artifacts: `sigmoid(w·x + b) >= threshold` means class 1.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub n_features: usize,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.len() != self.n_features {
            return Err(format!(
                "logistic model has {} coefficients but n_features={}",
                self.coefficients.len(),
                self.n_features
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("logistic model has non-finite parameters".to_string());
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!("logistic threshold {} is outside [0, 1]", self.threshold));
        }
        Ok(())
    }

    /// Probability of class 1.
    ///
    /// `x` must have `n_features` columns.
    pub fn probability(&self, x: &[f64]) -> f64 {
        let w = DVector::from_column_slice(&self.coefficients);
        let x = DVector::from_column_slice(x);
        let z = w.dot(&x) + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }

    pub fn predict_class(&self, x: &[f64]) -> i64 {
        if self.probability(x) >= self.threshold { 1 } else { 0 }
    }
}
