//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use crate::Classifier;
use crate::sample::DenseSample;
use super::node::*;


/// Decision tree classifier.
/// This struct is a wrapper of `Node`
/// that also remembers the class labels
/// and the impurity decrease earned by each feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    root: Node,
    classes: Vec<f64>,
    impurity_decrease: Vec<f64>,
}


impl DecisionTreeClassifier {
    #[inline]
    pub(super) fn new(
        root: Node,
        classes: Vec<f64>,
        impurity_decrease: Vec<f64>,
    ) -> Self
    {
        Self { root, classes, impurity_decrease }
    }


    /// Returns the class distribution of the leaf `x` falls into.
    #[inline]
    pub fn distribution(&self, x: &[f64]) -> &[f64] {
        self.root.distribution(x)
    }


    /// Returns the depth of the tree.
    /// A tree with a single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.leaves()
    }


    /// Returns the total impurity decrease earned by each feature,
    /// normalized to sum up to `1`.
    /// A tree without any split returns all zeros.
    pub fn feature_importances(&self) -> Vec<f64> {
        let total = self.impurity_decrease.iter().sum::<f64>();
        if total <= 0f64 {
            return vec![0f64; self.impurity_decrease.len()];
        }
        self.impurity_decrease.iter()
            .map(|d| d / total)
            .collect()
    }
}


impl Classifier for DecisionTreeClassifier {
    fn classes(&self) -> &[f64] {
        &self.classes[..]
    }


    fn predict_proba(&self, sample: &DenseSample, row: usize) -> Vec<f64> {
        self.distribution(sample.row(row)).to_vec()
    }
}
