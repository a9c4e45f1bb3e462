//! The decision tree grown inside the random forest.

/// Defines binning.
pub mod bin;
/// Defines the splitting criteria.
pub mod criterion;
/// Defines the builder of `DecisionTree`.
pub mod builder;
/// Defines the decision tree algorithm.
pub mod dtree;
/// Defines the classifier produced by `DecisionTree`.
pub mod dtree_classifier;

/// Defines the inner representations of `DecisionTreeClassifier`.
mod node;
mod split_rule;


pub use bin::{Bin, Bins, BinnedSample};
pub use builder::DecisionTreeBuilder;
pub use criterion::Criterion;
pub use dtree::DecisionTree;
pub use dtree_classifier::DecisionTreeClassifier;
