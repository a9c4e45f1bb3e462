//! This file defines split rules for decision tree.
use serde::{Serialize, Deserialize};


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LR {
    Left,
    Right,
}


/// Threshold of a split.
/// This is just a wrapper for `f64`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[repr(transparent)]
pub(crate) struct Threshold(pub(crate) f64);


impl From<f64> for Threshold {
    #[inline]
    fn from(threshold: f64) -> Self {
        Self(threshold)
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Splitter {
    pub(crate) feature: usize,
    pub(crate) threshold: Threshold,
}


impl Splitter {
    #[inline]
    pub(crate) fn new(feature: usize, threshold: Threshold) -> Self {
        Self { feature, threshold }
    }


    /// Defines the splitting.
    /// A feature beyond the end of `x` reads as zero,
    /// as an absent entry of a sparse record does.
    #[inline]
    pub(crate) fn split(&self, x: &[f64]) -> LR {
        let value = x.get(self.feature).copied().unwrap_or(0f64);

        if value < self.threshold.0 {
            LR::Left
        } else {
            LR::Right
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_by_threshold() {
        let rule = Splitter::new(1, Threshold::from(0.5));
        assert_eq!(rule.split(&[9.0, 0.2]), LR::Left);
        assert_eq!(rule.split(&[9.0, 0.5]), LR::Right);
        // missing trailing features are zeros.
        assert_eq!(rule.split(&[9.0]), LR::Left);
    }
}
