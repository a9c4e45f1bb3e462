//! Exports the samples, the learners, and the `Classifier` trait.
//!
pub use crate::sample::{
    SampleReader,
    ZeroBased,
    Sample,
    DenseSample,
};


pub use crate::decision_tree::{
    // Histogram decision tree
    BinnedSample,
    DecisionTreeBuilder,
    DecisionTree,
    DecisionTreeClassifier,
    Criterion,
};


pub use crate::forest::{
    // Random forest
    ForestConfig,
    MaxFeatures,
    RandomForestClassifier,
    RandomForest,
};


pub use crate::classifier::Classifier;


pub use crate::runner::{
    BenchmarkRunner,
    Report,
};
