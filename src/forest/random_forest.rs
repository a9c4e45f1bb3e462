//! Defines the random forest learner.
use fixedbitset::FixedBitSet;
use rand::{Rng, SeedableRng, thread_rng};
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use std::fmt;

use crate::common::checker;
use crate::classifier::argmax;
use crate::decision_tree::{
    BinnedSample,
    Criterion,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
};
use crate::error::Result;
use crate::sample::DenseSample;

use super::config::{ForestConfig, MaxFeatures};
use super::forest_classifier::RandomForest;
use super::worker_pool::WorkerPool;


/// The random forest algorithm by Leo Breiman.
/// Given a dense training sample,
/// [`RandomForestClassifier`] grows `n_trees` decision trees,
/// each on its own bootstrap sample
/// and with `max_features` features drawn at random per split,
/// and returns their average as [`RandomForest`].
///
/// The trees are grown in parallel on a dedicated pool of
/// exactly `n_jobs` worker threads.
/// Given a seed, the fitted forest does not depend on `n_jobs`.
///
/// # Example
/// ```no_run
/// use forestbench::prelude::*;
///
/// let sample = SampleReader::default()
///     .file("path/to/train.svmlight")
///     .read()
///     .unwrap()
///     .into_dense()
///     .unwrap();
///
/// let learner = RandomForestClassifier::benchmark()
///     .oob_score(true)
///     .seed(1234);
/// println!("{learner}");
///
/// let forest = learner.fit(&sample).unwrap();
/// let accuracy = forest.accuracy(&sample);
/// println!("train accuracy: {accuracy}, oob: {:?}", forest.oob_score());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RandomForestClassifier {
    config: ForestConfig,
}


impl RandomForestClassifier {
    /// Construct a new instance of [`RandomForestClassifier`]
    /// with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }


    /// Construct [`RandomForestClassifier`] from `config`.
    pub fn from_config(config: ForestConfig) -> Self {
        Self { config }
    }


    /// The learner used by the training benchmark.
    /// See [`ForestConfig::benchmark`].
    pub fn benchmark() -> Self {
        Self::from_config(ForestConfig::benchmark())
    }


    /// Returns the current parameters.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }


    /// Set the number of trees.
    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.config.n_trees = n_trees;
        self
    }


    /// Set the number of worker threads.
    pub fn n_jobs(mut self, n_jobs: usize) -> Self {
        self.config.n_jobs = n_jobs;
        self
    }


    /// Set the number of features drawn per split.
    pub fn max_features(mut self, max_features: MaxFeatures) -> Self {
        self.config.max_features = max_features;
        self
    }


    /// Set the splitting rule.
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.config.criterion = criterion;
        self
    }


    /// Set the maximal depth of the trees.
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_depth = depth;
        self
    }


    /// Set the minimum number of examples required to split a node.
    pub fn min_samples_split(mut self, n: usize) -> Self {
        self.config.min_samples_split = n;
        self
    }


    /// Set the minimum number of examples in a leaf.
    pub fn min_samples_leaf(mut self, n: usize) -> Self {
        self.config.min_samples_leaf = n;
        self
    }


    /// Grow the trees on bootstrap samples or on the whole sample.
    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.config.bootstrap = bootstrap;
        self
    }


    /// Set the size of each bootstrap sample.
    pub fn n_samples(mut self, n: Option<usize>) -> Self {
        self.config.n_samples = n;
        self
    }


    /// Set the number of bins per feature.
    pub fn n_bins(mut self, n_bins: usize) -> Self {
        self.config.n_bins = n_bins;
        self
    }


    /// Compute the out-of-bag accuracy while fitting.
    pub fn oob_score(mut self, flag: bool) -> Self {
        self.config.oob_score = flag;
        self
    }


    /// Fix the seed of the random draws.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }


    /// Fit the forest to `sample`.
    pub fn fit(&self, sample: &DenseSample) -> Result<RandomForest> {
        let config = &self.config;
        config.validate()?;
        checker::check_sample(sample)?;

        let (n_sample, n_feature) = sample.shape();
        let max_features = config.max_features.resolve(n_feature);
        let bag_size = config.n_samples.unwrap_or(n_sample);
        let seed = config.seed.unwrap_or_else(|| thread_rng().gen());

        let pool = WorkerPool::new(config.n_jobs)?;
        info!(
            n_sample,
            n_feature,
            n_trees = config.n_trees,
            n_jobs = pool.n_jobs(),
            max_features,
            "fitting the random forest"
        );

        let (classes, trees, oob_score) = pool.install(|| {
            let binned = BinnedSample::new(sample, config.n_bins);
            let tree = DecisionTreeBuilder::new(&binned)
                .criterion(config.criterion)
                .max_depth(config.max_depth)
                .min_samples_split(config.min_samples_split)
                .min_samples_leaf(config.min_samples_leaf)
                .max_features(max_features)
                .build();
            debug!("{tree}");

            let (trees, bags): (Vec<_>, Vec<_>) = (0..config.n_trees)
                .into_par_iter()
                .map(|t| {
                    let mut rng = StdRng::seed_from_u64(
                        seed.wrapping_add(t as u64)
                    );
                    let (weights, in_bag) = self.draw_bag(
                        n_sample, bag_size, &mut rng
                    );
                    let f = tree.produce(&binned, &weights, &mut rng);
                    debug!(
                        tree = t,
                        depth = f.depth(),
                        leaves = f.n_leaves(),
                        "grew a tree"
                    );
                    (f, in_bag)
                })
                .unzip();

            let oob_score = if config.oob_score {
                out_of_bag_accuracy(&trees, &bags, sample, &binned)
            } else {
                None
            };
            (binned.classes().to_vec(), trees, oob_score)
        });

        let forest = RandomForest::new(trees, classes, n_feature, oob_score);
        info!(
            n_trees = forest.n_trees(),
            oob_score = ?forest.oob_score(),
            "fitted the random forest"
        );
        Ok(forest)
    }


    /// Draw the training rows of a tree.
    /// Returns the multiplicity of each row and the set of in-bag rows.
    fn draw_bag<R: Rng>(&self, n_sample: usize, bag_size: usize, rng: &mut R)
        -> (Vec<f64>, FixedBitSet)
    {
        let mut in_bag = FixedBitSet::with_capacity(n_sample);
        if !self.config.bootstrap {
            in_bag.insert_range(..);
            return (vec![1f64; n_sample], in_bag);
        }

        let mut weights = vec![0f64; n_sample];
        for _ in 0..bag_size {
            let i = rng.gen_range(0..n_sample);
            weights[i] += 1f64;
            in_bag.insert(i);
        }
        (weights, in_bag)
    }
}


/// Accuracy of the trees on the rows they did not see.
/// Each row is predicted by the average of the trees
/// whose bag misses it; rows in every bag are skipped.
fn out_of_bag_accuracy(
    trees: &[DecisionTreeClassifier],
    bags: &[FixedBitSet],
    sample: &DenseSample,
    binned: &BinnedSample,
) -> Option<f64>
{
    let n_class = binned.n_class();
    let labels = binned.labels();
    let votes = (0..binned.n_sample()).into_par_iter()
        .filter_map(|i| {
            let x = sample.row(i);
            let mut proba = vec![0f64; n_class];
            let mut n_voter = 0_usize;
            let voters = trees.iter()
                .zip(bags)
                .filter(|(_, bag)| !bag.contains(i));
            for (f, _) in voters {
                proba.iter_mut()
                    .zip(f.distribution(x))
                    .for_each(|(p, d)| { *p += d; });
                n_voter += 1;
            }
            (n_voter > 0).then(|| argmax(&proba) == labels[i])
        })
        .collect::<Vec<bool>>();

    if votes.is_empty() {
        warn!("every example is in every bag, no out-of-bag score");
        return None;
    }

    let correct = votes.iter().filter(|&&ok| ok).count();
    Some(correct as f64 / votes.len() as f64)
}


impl fmt::Display for RandomForestClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RandomForestClassifier({})", self.config)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

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
    fn display_matches_the_benchmark() {
        let learner = RandomForestClassifier::benchmark();
        let line = learner.to_string();
        assert!(
            line.starts_with(
                "RandomForestClassifier(n_trees=50, n_jobs=8, max_features=7, "
            )
        );
        assert!(line.ends_with("seed=None)"));
    }


    #[test]
    fn draw_bag_counts_multiplicities() {
        let learner = RandomForestClassifier::new();
        let mut rng = StdRng::seed_from_u64(7);
        let (weights, in_bag) = learner.draw_bag(10, 25, &mut rng);

        assert_eq!(weights.iter().sum::<f64>(), 25.0);
        for (i, &w) in weights.iter().enumerate() {
            assert_eq!(w > 0.0, in_bag.contains(i));
        }
    }


    #[test]
    fn no_bootstrap_uses_every_row() {
        let learner = RandomForestClassifier::new().bootstrap(false);
        let mut rng = StdRng::seed_from_u64(7);
        let (weights, in_bag) = learner.draw_bag(5, 5, &mut rng);
        assert_eq!(weights, vec![1.0; 5]);
        assert_eq!(in_bag.count_ones(..), 5);
    }


    #[test]
    fn fit_is_reproducible_across_workers() {
        let sample = toy();
        let learner = RandomForestClassifier::new()
            .n_trees(8)
            .seed(42);
        let f1 = learner.clone().n_jobs(1).fit(&sample).unwrap();
        let f2 = learner.n_jobs(3).fit(&sample).unwrap();
        assert_eq!(f1, f2);
    }


    #[test]
    fn oob_score_is_a_fraction() {
        let sample = toy();
        let forest = RandomForestClassifier::new()
            .n_trees(30)
            .n_jobs(2)
            .oob_score(true)
            .seed(0)
            .fit(&sample)
            .unwrap();
        let score = forest.oob_score().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}
