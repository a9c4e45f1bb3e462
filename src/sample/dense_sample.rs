use crate::error::{ForestError, Result};


/// A fully materialized sample.
/// Features are stored row-major with explicit zeros.
/// A `DenseSample` is immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseSample {
    data: Vec<f64>,
    target: Vec<f64>,
    n_sample: usize,
    n_feature: usize,
}


impl DenseSample {
    /// Construct a new `DenseSample` from row-major `data`.
    /// The number of examples is `target.len()`,
    /// so `data.len()` must equal `target.len() * n_feature`.
    pub fn new(data: Vec<f64>, n_feature: usize, target: Vec<f64>)
        -> Result<Self>
    {
        let n_sample = target.len();
        let expected = n_sample.checked_mul(n_feature)
            .ok_or(ForestError::TooLarge { n_sample, n_feature })?;

        if data.len() != expected {
            return Err(ForestError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { data, target, n_sample, n_feature })
    }


    /// Construct a new `DenseSample` from rows of equal length.
    pub fn from_rows<R>(rows: &[R], target: Vec<f64>) -> Result<Self>
        where R: AsRef<[f64]>
    {
        if rows.len() != target.len() {
            return Err(ForestError::ShapeMismatch {
                expected: target.len(),
                actual: rows.len(),
            });
        }

        let n_feature = rows.first()
            .map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * n_feature);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_feature {
                return Err(ForestError::ShapeMismatch {
                    expected: n_feature,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Self::new(data, n_feature, target)
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the `i`-th example.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_feature;
        &self.data[start..start + self.n_feature]
    }


    /// Returns the value of the `j`-th feature of the `i`-th example.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n_feature + j]
    }


    /// Iterate over the values of the `j`-th feature.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(j < self.n_feature, "feature {j} is out of range");
        self.data.get(j..)
            .unwrap_or(&[])
            .iter()
            .step_by(self.n_feature)
            .copied()
    }


    /// Iterate over the examples.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_sample).map(|i| self.row(i))
    }


    /// Returns the target values.
    #[inline]
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }
}
