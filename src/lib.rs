//!
//! A crate that trains random forests on svmlight files
//! and measures how long the training takes.
//!
//! The pipeline has four steps.
//!
//! - Load
//!     [`SampleReader`] parses a svmlight file into a sparse [`Sample`].
//!     Malformed records are reported with their line number.
//!
//! - Densify
//!     [`Sample::densify`] materializes a row-major [`DenseSample`],
//!     absent entries become explicit zeros.
//!
//! - Train
//!     [`RandomForestClassifier`] grows histogram decision trees
//!     on bootstrap samples, in parallel on exactly `n_jobs` threads.
//!     The fitted [`RandomForest`] implements [`Classifier`].
//!
//! - Report
//!     [`BenchmarkRunner`] prints the classifier configuration and
//!     `Training on <path> took <seconds>`.
//!
//! # Example
//! ```no_run
//! use forestbench::prelude::*;
//!
//! let sample = Sample::from_svmlight("path/to/train.svmlight")
//!     .unwrap()
//!     .densify()
//!     .unwrap();
//!
//! let forest = RandomForestClassifier::benchmark()
//!     .seed(0)
//!     .fit(&sample)
//!     .unwrap();
//! let predictions = forest.predict_all(&sample);
//! assert_eq!(predictions.len(), sample.shape().0);
//! ```

pub mod error;
pub mod common;
pub mod sample;
pub mod classifier;
pub mod decision_tree;
pub mod forest;
pub mod runner;
pub mod logging;
pub mod prelude;


pub use error::{ForestError, Result};

// Export the structs that read and hold the samples.
pub use sample::{
    SampleReader,
    ZeroBased,
    Sample,
    DenseSample,
};

pub use classifier::Classifier;

pub use forest::{
    ForestConfig,
    MaxFeatures,
    RandomForestClassifier,
    RandomForest,
};

pub use runner::{BenchmarkRunner, Report};
