//! Defines the fitted random forest.
use serde::{Serialize, Deserialize};

use crate::Classifier;
use crate::decision_tree::DecisionTreeClassifier;
use crate::sample::DenseSample;


/// A fitted random forest.
/// The class probabilities are the average of
/// the leaf distributions of the trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTreeClassifier>,
    classes: Vec<f64>,
    n_feature: usize,
    oob_score: Option<f64>,
}


impl RandomForest {
    #[inline]
    pub(super) fn new(
        trees: Vec<DecisionTreeClassifier>,
        classes: Vec<f64>,
        n_feature: usize,
        oob_score: Option<f64>,
    ) -> Self
    {
        Self { trees, classes, n_feature, oob_score }
    }


    /// Returns the number of trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }


    /// Returns the trees.
    pub fn trees(&self) -> &[DecisionTreeClassifier] {
        &self.trees[..]
    }


    /// Returns the number of features seen while fitting.
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Returns the out-of-bag accuracy
    /// if it was requested and at least one example was out of bag.
    pub fn oob_score(&self) -> Option<f64> {
        self.oob_score
    }


    /// Class probabilities of a single feature vector.
    /// Missing trailing features are read as `0`.
    pub fn proba(&self, x: &[f64]) -> Vec<f64> {
        let mut proba = vec![0f64; self.classes.len()];
        for tree in &self.trees {
            proba.iter_mut()
                .zip(tree.distribution(x))
                .for_each(|(p, d)| { *p += d; });
        }

        let n_trees = self.trees.len().max(1) as f64;
        proba.iter_mut().for_each(|p| { *p /= n_trees; });
        proba
    }


    /// Mean decrease in impurity of each feature,
    /// averaged over the trees.
    /// The values sum up to `1` unless no tree has a split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut importances = vec![0f64; self.n_feature];
        let mut n_split_trees = 0_usize;
        for tree in &self.trees {
            let imp = tree.feature_importances();
            if imp.iter().all(|&v| v == 0f64) { continue; }

            importances.iter_mut()
                .zip(imp)
                .for_each(|(a, v)| { *a += v; });
            n_split_trees += 1;
        }

        if n_split_trees > 0 {
            let n = n_split_trees as f64;
            importances.iter_mut().for_each(|a| { *a /= n; });
        }
        importances
    }
}


impl Classifier for RandomForest {
    fn classes(&self) -> &[f64] {
        &self.classes[..]
    }


    fn predict_proba(&self, sample: &DenseSample, row: usize) -> Vec<f64> {
        self.proba(sample.row(row))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::RandomForestClassifier;

    fn toy() -> DenseSample {
        DenseSample::from_rows(
            &[
                [10.0,  5.0],
                [14.0,  8.0],
                [15.0,  3.0],
                [ 5.0,  1.0],
                [ 3.0,  9.0],
                [ 8.0, 13.0],
                [12.0, 11.0],
            ],
            vec![1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0],
        ).unwrap()
    }


    #[test]
    fn probabilities_sum_to_one() {
        let sample = toy();
        let forest = RandomForestClassifier::new()
            .n_trees(10)
            .seed(3)
            .fit(&sample)
            .unwrap();

        assert_eq!(forest.n_trees(), 10);
        assert_eq!(forest.classes(), &[-1.0, 1.0]);
        for proba in forest.predict_proba_all(&sample) {
            assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
        // Short feature vectors are padded with zeros.
        assert_eq!(forest.proba(&[]).len(), 2);
    }


    #[test]
    fn importances_sum_to_one() {
        let sample = toy();
        let forest = RandomForestClassifier::new()
            .n_trees(5)
            .bootstrap(false)
            .seed(11)
            .fit(&sample)
            .unwrap();
        let importances = forest.feature_importances();
        assert_eq!(importances.len(), 2);
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}
