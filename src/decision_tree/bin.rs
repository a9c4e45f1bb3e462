//! Binning: every feature is cut into quantile bins once,
//! and every value is replaced by the code of its bin.
use rayon::prelude::*;

use std::ops::Range;
use std::cmp::Ordering;

use crate::sample::DenseSample;


/// A half-open interval `[start, end)` of feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin(pub Range<f64>);

impl Bin {
    /// Create a new instance of `Bin`.
    #[inline(always)]
    pub fn new(range: Range<f64>) -> Self {
        Self(range)
    }


    /// Check whether the given `item` is conteined by `self.`
    #[inline(always)]
    pub fn contains(&self, item: &f64) -> bool {
        self.0.contains(item)
    }


    #[inline(always)]
    pub fn start(&self) -> f64 { self.0.start }


    #[inline(always)]
    pub fn end(&self) -> f64 { self.0.end }
}


/// A wrapper of `Vec<Bin>`.
/// The bins are contiguous, the left-most one starts at `f64::MIN`
/// and the right-most one ends at `f64::MAX`.
#[derive(Debug, Clone)]
pub struct Bins(Vec<Bin>);

impl Bins {
    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns the `k`-th bin.
    pub fn get(&self, k: usize) -> &Bin {
        &self.0[k]
    }


    /// Cut the given values into at most `n_bin` bins.
    /// With at most `n_bin` distinct values, every distinct value
    /// gets its own bin; otherwise the bins hold (roughly) the same
    /// number of values.
    /// Bin boundaries lie halfway between two consecutive values,
    /// so every bin of the training values is non-empty.
    /// A constant (or empty) feature gets a single bin.
    pub fn cut<I>(values: I, n_bin: usize) -> Self
        where I: IntoIterator<Item = f64>
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);

        let mut distinct = values.clone();
        distinct.dedup();

        let boundaries = if n_bin < 2 {
            Vec::new()
        } else if distinct.len() <= n_bin {
            distinct.windows(2)
                .map(|w| midpoint(w[0], w[1]))
                .collect::<Vec<_>>()
        } else {
            let n = values.len();
            let mut boundaries = (1..n_bin)
                .filter_map(|k| {
                    let i = k * n / n_bin;
                    let (l, r) = (values[i - 1], values[i]);
                    (l < r).then(|| midpoint(l, r))
                })
                .collect::<Vec<_>>();
            boundaries.dedup();
            boundaries
        };

        let mut starts = Vec::with_capacity(boundaries.len() + 1);
        starts.push(f64::MIN);
        starts.extend(boundaries.iter().copied());

        let mut ends = boundaries;
        ends.push(f64::MAX);

        let bins = starts.into_iter()
            .zip(ends)
            .map(|(l, r)| Bin::new(l..r))
            .collect::<Vec<_>>();

        Self(bins)
    }


    /// Returns the index of the bin that contains `x`.
    pub fn position(&self, x: f64) -> usize {
        let last = self.0.len() - 1;
        self.0.binary_search_by(|bin| {
                if bin.contains(&x) {
                    Ordering::Equal
                } else if bin.end() <= x {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            })
            .unwrap_or_else(|pos| pos.min(last))
    }
}


/// The training sample after binning.
/// Bin codes are stored column-major so that a split search
/// over one feature reads contiguous memory.
#[derive(Debug)]
pub struct BinnedSample {
    bins: Vec<Bins>,
    codes: Vec<u16>,
    labels: Vec<usize>,
    classes: Vec<f64>,
    n_sample: usize,
}


impl BinnedSample {
    /// Bin every feature of `sample` into at most `n_bin` bins.
    /// The number of bins of a feature never exceeds
    /// its number of distinct values.
    /// `n_bin` must not exceed `MAX_NBIN`.
    pub fn new(sample: &DenseSample, n_bin: usize) -> Self {
        let (n_sample, n_feature) = sample.shape();

        let per_feature = (0..n_feature).into_par_iter()
            .map(|j| {
                let column = sample.column(j).collect::<Vec<_>>();
                let bins = Bins::cut(column.iter().copied(), n_bin);
                let codes = column.iter()
                    .map(|&x| bins.position(x) as u16)
                    .collect::<Vec<_>>();
                (bins, codes)
            })
            .collect::<Vec<_>>();

        let mut bins = Vec::with_capacity(n_feature);
        let mut codes = Vec::with_capacity(n_sample * n_feature);
        for (b, c) in per_feature {
            bins.push(b);
            codes.extend(c);
        }

        let (classes, labels) = encode_labels(sample.target());

        Self { bins, codes, labels, classes, n_sample }
    }


    /// Returns the number of examples.
    #[inline]
    pub fn n_sample(&self) -> usize {
        self.n_sample
    }


    /// Returns the number of features.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.bins.len()
    }


    /// Returns the number of distinct labels.
    #[inline]
    pub fn n_class(&self) -> usize {
        self.classes.len()
    }


    /// Returns the distinct labels in ascending order.
    #[inline]
    pub fn classes(&self) -> &[f64] {
        &self.classes[..]
    }


    /// Returns the class index of each example.
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels[..]
    }


    /// Returns the bins of the `j`-th feature.
    #[inline]
    pub fn bins(&self, j: usize) -> &Bins {
        &self.bins[j]
    }


    /// Returns the bin codes of the `j`-th feature.
    #[inline]
    pub fn codes(&self, j: usize) -> &[u16] {
        let start = j * self.n_sample;
        &self.codes[start..start + self.n_sample]
    }
}


/// Returns a value `m` with `l < m <= r`, halfway between `l < r`.
/// Never overflows, even for values of opposite extreme signs.
pub(crate) fn midpoint(l: f64, r: f64) -> f64 {
    let m = l / 2f64 + r / 2f64;
    if m <= l { r } else { m.min(r) }
}


/// Map every target value to the index of its class.
/// Returns the sorted distinct labels and the class indices.
fn encode_labels(target: &[f64]) -> (Vec<f64>, Vec<usize>) {
    // `-0.0` and `0.0` are the same class.
    let normalize = |y: f64| if y == 0f64 { 0f64 } else { y };

    let mut classes = target.iter()
        .copied()
        .map(normalize)
        .collect::<Vec<_>>();
    classes.sort_by(f64::total_cmp);
    classes.dedup();

    let labels = target.iter()
        .map(|&y| {
            let y = normalize(y);
            match classes.binary_search_by(|c| c.total_cmp(&y)) {
                Ok(k) => k,
                Err(_) => unreachable!("every label is one of the classes"),
            }
        })
        .collect::<Vec<_>>();

    (classes, labels)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_covers_the_real_line() {
        let bins = Bins::cut([0.0, 4.0, 8.0], 4);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.get(0).start(), f64::MIN);
        assert_eq!(bins.get(0).end(), 2.0);
        assert_eq!(bins.get(1).start(), 2.0);
        assert_eq!(bins.get(1).end(), 6.0);
        assert_eq!(bins.get(2).end(), f64::MAX);
    }


    #[test]
    fn constant_feature_has_one_bin() {
        let bins = Bins::cut([3.0, 3.0, 3.0], 255);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins.position(3.0), 0);
        assert_eq!(bins.position(-1e300), 0);
    }


    #[test]
    fn position_finds_the_bin() {
        let bins = Bins::cut([0.0, 2.5, 5.0, 7.5, 10.0], 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.position(-100.0), 0);
        assert_eq!(bins.position(0.0), 0);
        assert_eq!(bins.position(2.0), 1);
        assert_eq!(bins.position(5.5), 2);
        assert_eq!(bins.position(10.0), 4);
        assert_eq!(bins.position(1e10), 4);
        assert_eq!(bins.position(f64::MAX), 4);
    }


    #[test]
    fn outlier_keeps_the_other_values_apart() {
        let values = [0.0, 1.0, 2.0, 3.0, 1e9];
        let bins = Bins::cut(values, 255);
        assert_eq!(bins.len(), 5);
        let codes = values.iter()
            .map(|&x| bins.position(x))
            .collect::<Vec<_>>();
        assert_eq!(codes, vec![0, 1, 2, 3, 4]);
    }


    #[test]
    fn extreme_range_is_split() {
        let values = [-f64::MAX, -1.0, 1.0, f64::MAX];
        let bins = Bins::cut(values, 255);
        assert_eq!(bins.len(), 4);
        for (k, &x) in values.iter().enumerate() {
            assert_eq!(bins.position(x), k);
        }
        assert!(bins.get(1).start().is_finite());
    }


    #[test]
    fn many_values_share_bins_evenly() {
        let values = (0..100).map(f64::from).collect::<Vec<_>>();
        let bins = Bins::cut(values.iter().copied(), 4);
        assert_eq!(bins.len(), 4);

        let mut counts = vec![0; 4];
        for &x in &values {
            counts[bins.position(x)] += 1;
        }
        assert_eq!(counts, vec![25, 25, 25, 25]);
    }


    #[test]
    fn midpoint_stays_between() {
        assert_eq!(midpoint(1.0, 3.0), 2.0);
        assert_eq!(midpoint(-f64::MAX, f64::MAX), 0.0);
        let l: f64 = 1.0;
        let r = f64::from_bits(l.to_bits() + 1);
        assert_eq!(midpoint(l, r), r);
    }


    #[test]
    fn binned_sample_codes_and_labels() {
        let sample = DenseSample::from_rows(
            &[[0.0, 5.0], [1.0, 5.0], [2.0, 5.0], [3.0, 5.0]],
            vec![2.0, -1.0, 2.0, -0.0],
        ).unwrap();
        let binned = BinnedSample::new(&sample, 255);

        assert_eq!(binned.n_sample(), 4);
        assert_eq!(binned.n_feature(), 2);
        assert_eq!(binned.classes(), &[-1.0, 0.0, 2.0]);
        assert_eq!(binned.labels(), &[2, 0, 2, 1]);

        // 4 distinct values give 4 bins, the constant column gives 1.
        assert_eq!(binned.bins(0).len(), 4);
        assert_eq!(binned.bins(1).len(), 1);
        assert_eq!(binned.codes(0), &[0, 1, 2, 3]);
        assert_eq!(binned.codes(1), &[0, 0, 0, 0]);
    }
}
