use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

use std::fmt;

use crate::common::constants::NUMERIC_TOLERANCE;
use super::bin::BinnedSample;
use super::criterion::{Criterion, Split};
use super::node::Node;
use super::split_rule::{Splitter, Threshold};
use super::dtree_classifier::DecisionTreeClassifier;


/// The Decision Tree algorithm.
/// Given a binned training sample and a weight per example,
/// [`DecisionTree`] outputs a decision tree classifier
/// named [`DecisionTreeClassifier`]
/// under the specified parameters.
///
/// The code is based on the book:
/// [Classification and Regression
/// Trees](https://www.amazon.com/Classification-Regression-Wadsworth-Statistics-Probability/dp/0412048418)
/// by Leo Breiman, Jerome H. Friedman, Richard A. Olshen, and Charles J. Stone.
///
/// Each split only looks at `max_features` features drawn at random,
/// which makes the trees of a random forest differ from each other.
///
/// [`DecisionTree`] is constructed
/// by [`DecisionTreeBuilder`](crate::decision_tree::DecisionTreeBuilder).
#[derive(Debug, Clone)]
pub struct DecisionTree {
    criterion: Criterion,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    max_features: usize,
}


/// Mutable state shared by the recursive calls of `DecisionTree::grow`.
struct Grower<'a, R> {
    sample: &'a BinnedSample,
    weights: &'a [f64],
    rng: &'a mut R,
    impurity_decrease: Vec<f64>,
}


impl DecisionTree {
    /// Initialize [`DecisionTree`].
    /// This method is called only via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn from_components(
        criterion: Criterion,
        max_depth: Option<usize>,
        min_samples_split: usize,
        min_samples_leaf: usize,
        max_features: usize,
    ) -> Self
    {
        Self {
            criterion,
            max_depth,
            min_samples_split,
            min_samples_leaf,
            max_features,
        }
    }


    /// Grow a tree on `sample`.
    /// `weights[i]` is the multiplicity of the `i`-th example,
    /// examples with zero weight are ignored.
    /// The randomness of the feature draws comes from `rng` only.
    pub fn produce<R: Rng>(
        &self,
        sample: &BinnedSample,
        weights: &[f64],
        rng: &mut R,
    ) -> DecisionTreeClassifier
    {
        let indices = (0..sample.n_sample())
            .filter(|&i| weights[i] > 0f64)
            .collect::<Vec<usize>>();

        let mut grower = Grower {
            sample,
            weights,
            rng,
            impurity_decrease: vec![0f64; sample.n_feature()],
        };
        let root = self.grow(&mut grower, indices, 0);

        DecisionTreeClassifier::new(
            *root,
            sample.classes().to_vec(),
            grower.impurity_decrease,
        )
    }


    fn grow<R: Rng>(
        &self,
        grower: &mut Grower<'_, R>,
        indices: Vec<usize>,
        depth: usize,
    ) -> Box<Node>
    {
        let weights = class_weights(grower.sample, grower.weights, &indices);
        let n_rows = indices.len();

        let is_pure = weights.iter().filter(|&&w| w > 0f64).count() <= 1;
        let reached_depth = self.max_depth.is_some_and(|d| depth >= d);
        if is_pure
            || reached_depth
            || n_rows < self.min_samples_split
            || n_rows < 2 * self.min_samples_leaf
        {
            return Box::new(Node::leaf(weights));
        }


        // Find the best pair of feature and threshold
        // based on the `criterion`.
        let Some(split) = self.find_split(grower, &indices) else {
            return Box::new(Node::leaf(weights));
        };

        let total = weights.iter().sum::<f64>();
        let decrease = total * self.criterion.impurity(&weights) - split.score;
        if decrease > NUMERIC_TOLERANCE {
            grower.impurity_decrease[split.feature] += decrease;
        }


        // Split the train data for left/right childrens
        let codes = grower.sample.codes(split.feature);
        let (lindices, rindices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| codes[i] as usize <= split.bin);

        let rule = Splitter::new(split.feature, Threshold::from(split.threshold));
        let left = self.grow(grower, lindices, depth + 1);
        let right = self.grow(grower, rindices, depth + 1);

        Box::new(Node::branch(rule, left, right))
    }


    /// Draw `max_features` features at random and
    /// returns the best split among them.
    /// If none of them can split the node,
    /// the remaining features are tried in random order.
    fn find_split<R: Rng>(
        &self,
        grower: &mut Grower<'_, R>,
        indices: &[usize],
    ) -> Option<Split>
    {
        let n_feature = grower.sample.n_feature();
        let mut order = (0..n_feature).collect::<Vec<_>>();
        order.shuffle(&mut *grower.rng);
        let (drawn, rest) = order.split_at(self.max_features.min(n_feature));

        let sample = grower.sample;
        let weights = grower.weights;
        let split_on = |&j: &usize| {
            self.criterion.best_split(
                sample, j, indices, weights, self.min_samples_leaf
            )
        };

        let best = drawn.par_iter()
            .filter_map(split_on)
            .collect::<Vec<_>>()
            .into_iter()
            .min_by(|a, b| a.score.total_cmp(&b.score));

        best.or_else(|| rest.iter().find_map(split_on))
    }
}


/// Returns the total weight of each class over `indices`.
fn class_weights(sample: &BinnedSample, weights: &[f64], indices: &[usize])
    -> Vec<f64>
{
    let labels = sample.labels();
    let mut counter = vec![0f64; sample.n_class()];
    for &i in indices {
        counter[labels[i]] += weights[i];
    }
    counter
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_depth = self.max_depth
            .map_or_else(|| "None".to_string(), |d| d.to_string());
        write!(
            f,
            "DecisionTree(criterion={}, max_depth={max_depth}, \
            min_samples_split={}, min_samples_leaf={}, max_features={})",
            self.criterion,
            self.min_samples_split,
            self.min_samples_leaf,
            self.max_features,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Classifier;
    use crate::sample::DenseSample;
    use crate::decision_tree::DecisionTreeBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Toy example  (o/x are the pos/neg examples)
    //
    // 15|                     |
    //   |                   5 |
    //   |                  x  |
    //   |                     |         6
    //   |                     |        x
    // 10|       4             |________________________ 9.5
    //   |      x              |             1
    //   |                     |            o
    //   |                     |
    //   |                     |   0
    //  5|                     |  o
    //   |                     |                 2
    //   |                     |                o
    //   |            3        |
    //   |           x         |
    //   |_____________________|____________________
    //  0            5         | 10            15
    //                         |
    //                        9.0
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
    fn full_tree_fits_the_toy_sample() {
        let sample = toy();
        let binned = BinnedSample::new(&sample, 255);
        let tree = DecisionTreeBuilder::new(&binned)
            .criterion(Criterion::Entropy)
            .build();
        let weights = vec![1.0; 7];
        let mut rng = StdRng::seed_from_u64(1234);
        let f = tree.produce(&binned, &weights, &mut rng);

        assert_eq!(f.predict_all(&sample), sample.target());
        assert_eq!(f.depth(), 2);
        assert_eq!(f.n_leaves(), 3);

        let importances = f.feature_importances();
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }


    #[test]
    fn max_depth_bounds_the_tree() {
        let sample = toy();
        let binned = BinnedSample::new(&sample, 255);
        let tree = DecisionTreeBuilder::new(&binned)
            .max_depth(Some(1))
            .build();
        let weights = vec![1.0; 7];
        let mut rng = StdRng::seed_from_u64(0);
        let f = tree.produce(&binned, &weights, &mut rng);

        assert_eq!(f.depth(), 1);
        assert_eq!(f.n_leaves(), 2);
    }


    #[test]
    fn zero_weights_are_ignored() {
        let sample = toy();
        let binned = BinnedSample::new(&sample, 255);
        let tree = DecisionTreeBuilder::new(&binned).build();
        // Only the positive examples are in the bag.
        let weights = vec![1.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let mut rng = StdRng::seed_from_u64(0);
        let f = tree.produce(&binned, &weights, &mut rng);

        assert_eq!(f.n_leaves(), 1);
        assert_eq!(f.distribution(&[0.0, 0.0]), &[0.0, 1.0]);
        assert_eq!(f.feature_importances(), vec![0.0, 0.0]);
    }


    #[test]
    fn min_samples_split_stops_growth() {
        let sample = toy();
        let binned = BinnedSample::new(&sample, 255);
        let tree = DecisionTreeBuilder::new(&binned)
            .min_samples_split(8)
            .build();
        let weights = vec![1.0; 7];
        let mut rng = StdRng::seed_from_u64(0);
        let f = tree.produce(&binned, &weights, &mut rng);

        assert_eq!(f.n_leaves(), 1);
        // 3 positives and 4 negatives.
        assert_eq!(f.predict(&sample, 0), -1.0);
    }


    #[test]
    fn display_lists_the_parameters() {
        let binned = BinnedSample::new(&toy(), 255);
        let tree = DecisionTreeBuilder::new(&binned)
            .max_features(1)
            .build();
        assert_eq!(
            tree.to_string(),
            "DecisionTree(criterion=gini, max_depth=None, \
            min_samples_split=2, min_samples_leaf=1, max_features=1)"
        );
    }
}
