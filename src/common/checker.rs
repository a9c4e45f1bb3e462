//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::error::{ForestError, Result};
use crate::sample::DenseSample;


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn check_sample(sample: &DenseSample) -> Result<()> {
    let (n_sample, n_feature) = sample.shape();

    // `DenseSample::new` guarantees `n_data == n_target`,
    // so that we only need to check the size.
    if n_sample == 0 || n_feature == 0 {
        return Err(ForestError::EmptySample);
    }


    let bad = sample.target()
        .iter()
        .position(|y| !y.is_finite());
    if let Some(row) = bad {
        let value = sample.target()[row];
        return Err(ForestError::InvalidLabel { row, value });
    }
    Ok(())
}


/// Check whether `value` is at least `1`.
#[inline(always)]
pub(crate) fn check_positive(name: &'static str, value: usize)
    -> Result<()>
{
    if value == 0 {
        return Err(ForestError::invalid(name, "must be at least 1"));
    }
    Ok(())
}


/// Check whether `value` lies in `(0, 1]`.
#[inline(always)]
pub(crate) fn check_fraction(name: &'static str, value: f64)
    -> Result<()>
{
    if !(value > 0f64 && value <= 1f64) {
        return Err(ForestError::invalid(
            name, format!("must be in (0, 1], got {value}")
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sample_is_rejected() {
        let sample = DenseSample::new(Vec::new(), 3, Vec::new()).unwrap();
        assert!(matches!(check_sample(&sample), Err(ForestError::EmptySample)));
    }


    #[test]
    fn nan_label_is_rejected() {
        let sample = DenseSample::new(
            vec![1.0, 2.0], 1, vec![1.0, f64::NAN]
        ).unwrap();
        let err = check_sample(&sample).unwrap_err();
        assert!(matches!(err, ForestError::InvalidLabel { row: 1, .. }));
    }


    #[test]
    fn fraction_bounds() {
        assert!(check_fraction("f", 1.0).is_ok());
        assert!(check_fraction("f", 0.25).is_ok());
        assert!(check_fraction("f", 0.0).is_err());
        assert!(check_fraction("f", 1.5).is_err());
        assert!(check_fraction("f", f64::NAN).is_err());
    }


    #[test]
    fn zero_is_not_positive() {
        assert!(check_positive("n_trees", 0).is_err());
        assert!(check_positive("n_trees", 1).is_ok());
    }
}
