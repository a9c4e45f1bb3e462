use super::bin::BinnedSample;
use super::criterion::Criterion;
use super::dtree::DecisionTree;


/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```no_run
/// use forestbench::prelude::*;
///
/// let sample = Sample::from_svmlight("/path/to/file").unwrap()
///     .into_dense()
///     .unwrap();
/// let binned = BinnedSample::new(&sample, 255);
/// let tree = DecisionTreeBuilder::new(&binned)
///     .max_depth(Some(4))
///     .max_features(2)
///     .criterion(Criterion::Entropy)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeBuilder {
    n_feature: usize,
    criterion: Criterion,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    max_features: usize,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// criterion: Criterion::Gini,
    /// max_depth: None (grow until the leaves are pure),
    /// min_samples_split: 2,
    /// min_samples_leaf: 1,
    /// max_features: all the features,
    /// ```
    pub fn new(sample: &BinnedSample) -> Self {
        let n_feature = sample.n_feature();
        Self {
            n_feature,
            criterion: Criterion::Gini,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: n_feature,
        }
    }


    /// Set the node splitting rule.
    /// Default value is `Criterion::Gini`.
    #[inline]
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }


    /// Specify the maximal depth of the tree.
    /// `None` grows the tree until every leaf is pure.
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }


    /// The minimum number of examples required to split a node.
    /// Values below `2` are raised to `2`.
    pub fn min_samples_split(mut self, n: usize) -> Self {
        self.min_samples_split = n.max(2);
        self
    }


    /// The minimum number of examples each leaf must keep.
    /// Values below `1` are raised to `1`.
    pub fn min_samples_leaf(mut self, n: usize) -> Self {
        self.min_samples_leaf = n.max(1);
        self
    }


    /// The number of features drawn at random for each split.
    /// The value is clamped to `[1, # of features]`.
    pub fn max_features(mut self, n: usize) -> Self {
        self.max_features = n.clamp(1, self.n_feature.max(1));
        self
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        DecisionTree::from_components(
            self.criterion,
            self.max_depth,
            self.min_samples_split,
            self.min_samples_leaf,
            self.max_features,
        )
    }
}
