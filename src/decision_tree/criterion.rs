//! Splitting criteria for growing decision trees.

use serde::{Serialize, Deserialize};

use std::fmt;

use super::bin::{BinnedSample, midpoint};


/// Splitting criteria for growing decision tree.
/// * `Criterion::Gini` minimizes the Gini impurity.
/// * `Criterion::Entropy` minimizes entropic impurity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Gini index.
    Gini,
    /// Binary entropy function.
    Entropy,
}


impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gini => "gini",
            Self::Entropy => "entropy",
        };

        write!(f, "{name}")
    }
}


/// A candidate split of a node.
/// Examples whose bin code of `feature` is at most `bin`
/// go to the left child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Split {
    pub(super) feature: usize,
    pub(super) bin: usize,
    pub(super) threshold: f64,
    /// Weighted impurity of the two children.
    pub(super) score: f64,
}


impl Criterion {
    /// Returns the impurity of the given class weights.
    #[inline]
    pub(crate) fn impurity(&self, weights: &[f64]) -> f64 {
        let total = weights.iter().sum::<f64>();
        if total <= 0f64 { return 0f64; }

        match self {
            Self::Gini => {
                let correct = weights.iter()
                    .map(|&w| (w / total).powi(2))
                    .sum::<f64>();
                (1f64 - correct).max(0f64)
            },
            Self::Entropy => {
                weights.iter()
                    .map(|&w| {
                        let r = w / total;
                        if r <= 0f64 { 0f64 } else { -r * r.ln() }
                    })
                    .sum::<f64>()
            },
        }
    }


    /// Returns the best split of `indices` on the `feature`-th feature,
    /// or `None` if every split leaves less than `min_samples_leaf`
    /// examples on a side.
    ///
    /// The class weights are packed per bin and the bins are scanned
    /// from left to right; a split is placed halfway between
    /// two consecutive non-empty bins.
    pub(super) fn best_split(
        &self,
        binned: &BinnedSample,
        feature: usize,
        indices: &[usize],
        weights: &[f64],
        min_samples_leaf: usize,
    ) -> Option<Split>
    {
        let bins = binned.bins(feature);
        let n_bin = bins.len();
        if n_bin < 2 { return None; }

        let n_class = binned.n_class();
        let codes = binned.codes(feature);
        let labels = binned.labels();

        let mut pack = vec![0f64; n_bin * n_class];
        let mut count = vec![0_usize; n_bin];
        for &i in indices {
            let b = codes[i] as usize;
            pack[b * n_class + labels[i]] += weights[i];
            count[b] += 1;
        }

        let mut right = vec![0f64; n_class];
        for (k, w) in pack.iter().enumerate() {
            right[k % n_class] += w;
        }
        let mut left = vec![0f64; n_class];

        let n_rows = indices.len();
        let mut left_rows = 0_usize;
        let mut prev: Option<usize> = None;
        let mut best: Option<Split> = None;

        for b in 0..n_bin {
            if count[b] == 0 { continue; }

            if let Some(p) = prev {
                let right_rows = n_rows - left_rows;
                if left_rows >= min_samples_leaf
                    && right_rows >= min_samples_leaf
                {
                    let lw = left.iter().sum::<f64>();
                    let rw = right.iter().sum::<f64>();
                    let score = lw * self.impurity(&left)
                        + rw * self.impurity(&right);

                    if best.map_or(true, |s| score < s.score) {
                        let threshold = midpoint(bins.get(p).end(), bins.get(b).start());
                        best = Some(Split { feature, bin: p, threshold, score });
                    }
                }
            }

            // Move the weights in the `b`-th bin from right to left.
            let row = &pack[b * n_class..(b + 1) * n_class];
            for (c, &w) in row.iter().enumerate() {
                left[c] += w;
                right[c] = (right[c] - w).max(0f64);
            }
            left_rows += count[b];
            prev = Some(b);
        }

        best
    }
}
