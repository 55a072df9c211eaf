//! This file defines some functions that checks some pre-conditions
//! E.g., the range of a proportion, the number of folds.

use crate::error::{Result, MiniBalanceError};


/// Check whether `value` lies in the open interval `(0, 1)`.
#[inline]
pub(crate) fn check_open_unit_interval(name: &str, value: f64) -> Result<()> {
    if value > 0f64 && value < 1f64 {
        return Ok(());
    }
    Err(MiniBalanceError::InvalidConfiguration(format!(
        "{name} must be between 0 and 1 (was {value})"
    )))
}


/// Check whether `value` lies in the closed interval `[0, 1]`.
#[inline]
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0f64..=1f64).contains(&value) {
        return Ok(());
    }
    Err(MiniBalanceError::InvalidConfiguration(format!(
        "{name} must be in [0, 1] (was {value})"
    )))
}


/// Check whether the number of folds is valid or not.
#[inline]
pub(crate) fn check_n_folds(n_folds: usize) -> Result<()> {
    if n_folds >= 2 {
        return Ok(());
    }
    Err(MiniBalanceError::InvalidConfiguration(format!(
        "the number of folds must be at least 2 (was {n_folds})"
    )))
}


/// Check whether `value` is positive.
#[inline]
pub(crate) fn check_positive(name: &str, value: usize) -> Result<()> {
    if value > 0 {
        return Ok(());
    }
    Err(MiniBalanceError::InvalidConfiguration(format!(
        "{name} must be positive"
    )))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_interval_excludes_its_ends() {
        assert!(check_open_unit_interval("p", 0.0).is_err());
        assert!(check_open_unit_interval("p", 1.0).is_err());
        assert!(check_open_unit_interval("p", f64::NAN).is_err());
        assert!(check_open_unit_interval("p", 0.5).is_ok());
    }

    #[test]
    fn folds_must_be_at_least_two() {
        assert!(check_n_folds(1).is_err());
        assert!(check_n_folds(2).is_ok());
    }
}
