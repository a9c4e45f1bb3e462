//! Hyperparameters of the random forest.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::common::checker;
use crate::common::constants::{DEFAULT_NBIN, MAX_NBIN};
use crate::decision_tree::Criterion;
use crate::error::{ForestError, Result};


/// Number of trees grown by the benchmark.
pub const BENCHMARK_N_TREES: usize = 50;
/// Number of workers used by the benchmark.
pub const BENCHMARK_N_JOBS: usize = 8;
/// Number of features drawn per split by the benchmark.
pub const BENCHMARK_MAX_FEATURES: usize = 7;


/// The number of features drawn at random for each split.
/// The resolved value is always in `[1, # of features]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxFeatures {
    /// `floor(sqrt(# of features))`.
    Sqrt,
    /// `floor(log2(# of features))`.
    Log2,
    /// A fixed number of features.
    Fixed(usize),
    /// `floor(fraction * # of features)`, `fraction` in `(0, 1]`.
    Fraction(f64),
    /// Every feature.
    All,
}


impl MaxFeatures {
    /// Returns the number of features to draw
    /// from a sample with `n_feature` features.
    pub fn resolve(&self, n_feature: usize) -> usize {
        let n = n_feature as f64;
        let k = match *self {
            Self::Sqrt => n.sqrt().floor() as usize,
            Self::Log2 => n.log2().floor().max(0f64) as usize,
            Self::Fixed(k) => k,
            Self::Fraction(f) => (f * n).floor() as usize,
            Self::All => n_feature,
        };
        k.clamp(1, n_feature.max(1))
    }


    fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed(0) => Err(ForestError::invalid(
                "max_features", "must draw at least 1 feature"
            )),
            Self::Fraction(f) => checker::check_fraction("max_features", f),
            _ => Ok(()),
        }
    }
}


impl fmt::Display for MaxFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqrt => write!(f, "sqrt"),
            Self::Log2 => write!(f, "log2"),
            Self::Fixed(k) => write!(f, "{k}"),
            Self::Fraction(r) => write!(f, "{r}"),
            Self::All => write!(f, "all"),
        }
    }
}


/// Hyperparameters of [`RandomForestClassifier`](super::RandomForestClassifier).
///
/// Missing fields of a serialized config take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees.
    pub n_trees: usize,
    /// Number of worker threads that grow the trees.
    pub n_jobs: usize,
    /// Number of features drawn at random per split.
    pub max_features: MaxFeatures,
    /// Splitting rule.
    pub criterion: Criterion,
    /// Maximal depth of a tree, `None` grows pure leaves.
    pub max_depth: Option<usize>,
    /// Minimum number of examples required to split a node.
    pub min_samples_split: usize,
    /// Minimum number of examples in a leaf.
    pub min_samples_leaf: usize,
    /// Whether each tree is grown on a bootstrap sample.
    pub bootstrap: bool,
    /// Size of a bootstrap sample, `None` means the number of examples.
    pub n_samples: Option<usize>,
    /// Number of bins per feature.
    pub n_bins: usize,
    /// Whether to compute the out-of-bag accuracy.
    pub oob_score: bool,
    /// Seed of the random draws, `None` draws one from the OS.
    pub seed: Option<u64>,
}


impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            n_jobs: 1,
            max_features: MaxFeatures::Sqrt,
            criterion: Criterion::Gini,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            bootstrap: true,
            n_samples: None,
            n_bins: DEFAULT_NBIN,
            oob_score: false,
            seed: None,
        }
    }
}


impl ForestConfig {
    /// The fixed hyperparameters of the training benchmark:
    /// 50 trees, 8 workers, and 7 features per split.
    /// These are benchmark constants, not tuned defaults.
    pub fn benchmark() -> Self {
        Self {
            n_trees: BENCHMARK_N_TREES,
            n_jobs: BENCHMARK_N_JOBS,
            max_features: MaxFeatures::Fixed(BENCHMARK_MAX_FEATURES),
            ..Self::default()
        }
    }


    /// Check every parameter.
    pub fn validate(&self) -> Result<()> {
        checker::check_positive("n_trees", self.n_trees)?;
        checker::check_positive("n_jobs", self.n_jobs)?;
        checker::check_positive("min_samples_leaf", self.min_samples_leaf)?;
        self.max_features.validate()?;

        if self.min_samples_split < 2 {
            return Err(ForestError::invalid(
                "min_samples_split", "must be at least 2"
            ));
        }
        if let Some(depth) = self.max_depth {
            checker::check_positive("max_depth", depth)?;
        }
        if let Some(n) = self.n_samples {
            checker::check_positive("n_samples", n)?;
        }
        if !(2..=MAX_NBIN).contains(&self.n_bins) {
            return Err(ForestError::invalid(
                "n_bins", format!("must be in [2, {MAX_NBIN}]")
            ));
        }
        if self.oob_score && !self.bootstrap {
            return Err(ForestError::invalid(
                "oob_score", "requires bootstrap samples"
            ));
        }
        Ok(())
    }
}


impl fmt::Display for ForestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let none = || "None".to_string();
        let max_depth = self.max_depth.map_or_else(none, |d| d.to_string());
        let n_samples = self.n_samples.map_or_else(none, |n| n.to_string());
        let seed = self.seed.map_or_else(none, |s| s.to_string());
        write!(
            f,
            "n_trees={}, n_jobs={}, max_features={}, criterion={}, \
            max_depth={max_depth}, min_samples_split={}, \
            min_samples_leaf={}, bootstrap={}, n_samples={n_samples}, \
            n_bins={}, oob_score={}, seed={seed}",
            self.n_trees,
            self.n_jobs,
            self.max_features,
            self.criterion,
            self.min_samples_split,
            self.min_samples_leaf,
            self.bootstrap,
            self.n_bins,
            self.oob_score,
        )
    }
}
