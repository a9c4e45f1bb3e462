use std::ops::Index;


/// Sparse representation of a feature (a column of the sample).
#[derive(Debug, Clone, PartialEq)]
pub struct SparseFeature {
    /// Pairs of sample index and feature value,
    /// sorted by the sample index.
    pub(crate) sample: Vec<(usize, f64)>,
    /// Number of examples.
    /// Note that `self.n_sample >= self.sample.len()`.
    pub(crate) n_sample: usize,
}


impl SparseFeature {
    /// Construct an empty sparse feature over `n_sample` examples.
    pub fn new(n_sample: usize) -> Self {
        Self { sample: Vec::new(), n_sample }
    }


    /// Append a pair `(row, value)`.
    /// Rows must be appended in ascending order.
    pub(crate) fn append(&mut self, (row, value): (usize, f64)) {
        debug_assert!(
            self.sample.last().map_or(true, |&(i, _)| i < row),
            "rows of a sparse feature must be strictly increasing"
        );
        self.sample.push((row, value));
    }


    /// Returns the number of examples, including the implicit zeros.
    pub fn len(&self) -> usize {
        self.n_sample
    }


    /// Returns `true` if the feature covers no example.
    pub fn is_empty(&self) -> bool {
        self.n_sample == 0
    }


    /// Returns the number of explicitly stored values.
    pub fn nnz(&self) -> usize {
        self.sample.len()
    }


    /// Returns the stored `(row, value)` pairs.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.sample[..]
    }
}


impl Index<usize> for SparseFeature {
    type Output = f64;

    fn index(&self, row: usize) -> &Self::Output {
        assert!(row < self.n_sample, "row {row} is out of range");
        match self.sample.binary_search_by_key(&row, |&(i, _)| i) {
            Ok(k) => &self.sample[k].1,
            Err(_) => &0f64,
        }
    }
}
