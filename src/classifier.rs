//! The `Classifier` trait shared by decision trees and forests.
use crate::sample::DenseSample;


/// A trait that defines the behavor of classifier.
/// You only need to implement `classes` and `predict_proba` methods.
pub trait Classifier {
    /// Returns the class labels in ascending order.
    /// The `k`-th probability returned by `predict_proba`
    /// belongs to the `k`-th class.
    fn classes(&self) -> &[f64];


    /// Computes the class probabilities of the i'th row of `sample`.
    fn predict_proba(&self, sample: &DenseSample, row: usize) -> Vec<f64>;


    /// Predicts the label of the i'th row of `sample`.
    /// Ties go to the smaller label.
    fn predict(&self, sample: &DenseSample, row: usize) -> f64 {
        let proba = self.predict_proba(sample, row);
        let k = argmax(&proba);
        self.classes()[k]
    }


    /// Computes the class probabilities of every row of `sample`.
    fn predict_proba_all(&self, sample: &DenseSample) -> Vec<Vec<f64>> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict_proba(sample, row))
            .collect::<Vec<_>>()
    }


    /// Predicts the labels of `sample`.
    fn predict_all(&self, sample: &DenseSample) -> Vec<f64> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }


    /// Returns the fraction of rows of `sample`
    /// whose label is predicted correctly.
    fn accuracy(&self, sample: &DenseSample) -> f64 {
        let n_sample = sample.shape().0;
        if n_sample == 0 { return 0f64; }

        let correct = self.predict_all(sample)
            .into_iter()
            .zip(sample.target())
            .filter(|(p, y)| p == *y)
            .count();
        correct as f64 / n_sample as f64
    }
}


/// Returns the index of the first maximal value.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (k, &v) in values.iter().enumerate() {
        if v > values[best] { best = k; }
    }
    best
}
