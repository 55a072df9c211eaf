use serde::{Serialize, Deserialize};

use std::ops::Range;

use crate::common::checker;
use crate::error::{Result, MiniBalanceError};
use crate::sample::Sample;


/// A contiguous block of rows `start..end` held out as a test set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fold {
    /// Position of this fold among its siblings.
    pub index: usize,
    /// First row of the fold.
    pub start: usize,
    /// One past the last row of the fold.
    pub end: usize,
}


impl Fold {
    /// Returns the number of rows in this fold.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }


    /// Returns `true` if this fold has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }


    /// Returns the rows of this fold.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}


/// Partitions `n` rows into `k` contiguous folds.
/// 
/// The folds are disjoint, cover every row, keep the row order,
/// and their sizes differ by at most one:
/// the first `n % k` folds get one extra row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldSplitter {
    n_folds: usize,
}


impl FoldSplitter {
    /// Construct a new instance of `FoldSplitter`.
    /// `n_folds` must be at least `2`.
    pub fn new(n_folds: usize) -> Result<Self> {
        checker::check_n_folds(n_folds)?;
        Ok(Self { n_folds })
    }


    /// Returns the number of folds.
    #[inline]
    pub fn n_folds(&self) -> usize {
        self.n_folds
    }


    /// Returns the folds of `n_sample` rows.
    /// Every fold must hold at least one row,
    /// so `n_sample` must not be smaller than the number of folds.
    pub fn split(&self, n_sample: usize) -> Result<Vec<Fold>> {
        if n_sample == 0 {
            return Err(MiniBalanceError::EmptyDataset);
        }
        if n_sample < self.n_folds {
            return Err(MiniBalanceError::InvalidConfiguration(format!(
                "cannot split {n_sample} instances into {} folds",
                self.n_folds
            )));
        }

        let base = n_sample / self.n_folds;
        let remainder = n_sample % self.n_folds;

        let mut start = 0;
        let folds = (0..self.n_folds)
            .map(|index| {
                let size = if index < remainder { base + 1 } else { base };
                let fold = Fold { index, start, end: start + size };
                start += size;
                fold
            })
            .collect();
        Ok(folds)
    }


    /// Splits `sample` into the samples of each fold.
    pub fn split_sample(&self, sample: &Sample) -> Result<Vec<Sample>> {
        let folds = self.split(sample.len())?;
        let ix = (0..sample.len()).collect::<Vec<_>>();
        let samples = folds.into_iter()
            .map(|fold| sample.subset(&ix[fold.range()]))
            .collect();
        Ok(samples)
    }
}
