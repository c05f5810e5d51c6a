//! Random-forest evaluation over flat node arrays.
//!
//! Trees use the scikit-learn layout: node 0 is the root, a split sends the
//! sample left when `x[feature] <= threshold`, and leaves carry per-class
//! weights (sample counts or fractions; they are normalized per tree).
//!
//! Inputs are rounded to `f32` before each comparison, as scikit-learn trees
//! evaluate on `float32` data, so a fractional value just above a threshold
//! routes the same way it did in the exporting pipeline.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<Tree>,
}

impl Tree {
    /// Check the node array is walkable: children point strictly forward and
    /// stay in range, features are in range, leaves have one weight per class.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let n = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {idx} splits on feature {feature} (n_features={n_features})"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= n {
                            return Err(format!("node {idx} has invalid child index {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(format!(
                            "leaf {idx} has {} class weights (expected {n_classes})",
                            value.len()
                        ));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(format!("leaf {idx} has a negative or non-finite weight"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf reached by `x`.
    ///
    /// Assumes the tree passed `validate` and `x` has at least `n_features` columns.
    fn distribution(&self, x: &[f64]) -> Vec<f64> {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if f64::from(x[*feature] as f32) <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    if total > 0.0 {
                        return value.iter().map(|w| w / total).collect();
                    }
                    return vec![0.0; value.len()];
                }
            }
        }
    }
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.len() != 2 {
            return Err(format!("expected 2 classes, found {}", self.classes.len()));
        }
        if self.trees.is_empty() {
            return Err("random forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }

    /// Mean class distribution across trees.
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let k = self.classes.len();
        let sum = self
            .trees
            .par_iter()
            .map(|t| t.distribution(x))
            .reduce(
                || vec![0.0; k],
                |mut acc, d| {
                    for (a, v) in acc.iter_mut().zip(d) {
                        *a += v;
                    }
                    acc
                },
            );
        let n = self.trees.len() as f64;
        sum.into_iter().map(|v| v / n).collect()
    }

    /// Class value with the highest mean probability (first wins ties).
    pub fn predict_class(&self, x: &[f64]) -> i64 {
        let proba = self.predict_proba(x);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}
