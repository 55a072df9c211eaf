use rand::prelude::*;
use colored::Colorize;

use crate::error::Result;
use crate::config::DEFAULT_SEED;
use crate::sample::Sample;
use super::fold_splitter::{Fold, FoldSplitter};

const WIDTH: usize = 9;

/// A struct that generates
/// pairs of training/test sample for cross validation.
/// The `i`th test sample is the `i`th fold of `FoldSplitter`
/// and the training sample is the union of the other folds.
/// # Example
/// ```
/// use minibalance::prelude::*;
/// use minibalance::CrossValidation;
///
/// let sample = (0..10)
///     .map(|i| Instance::from_pairs([("x", i as f64)], i % 2))
///     .collect::<Sample>();
/// let cv = CrossValidation::new(&sample, 5)
///     .unwrap()
///     .seed(777)
///     .shuffle();
/// for (train, test) in cv {
///     assert_eq!(train.len(), 8);
///     assert_eq!(test.len(), 2);
/// }
/// ```
pub struct CrossValidation<'a> {
    current_fold: usize,
    folds: Vec<Fold>,
    seed: u64,
    sample: &'a Sample,
    ix: Vec<usize>,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    /// Fails if `sample` cannot be split into `n_folds` folds.
    #[inline]
    pub fn new(sample: &'a Sample, n_folds: usize) -> Result<Self> {
        let folds = FoldSplitter::new(n_folds)?.split(sample.len())?;
        let ix = (0..sample.len()).collect::<Vec<_>>();
        Ok(Self {
            current_fold: 0,
            seed: DEFAULT_SEED,
            verbose: false,
            folds,
            sample,
            ix,
        })
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the training sample.
    /// By default, `CrossValidation` does not shuffle the sample.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.ix.shuffle(&mut rng);
        self
    }


    /// Returns the number of folds.
    #[inline]
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }


    /// Returns the training/test sample for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (Sample, Sample) {
        let fold = self.folds[i];
        self.sample.split(&self.ix, fold.start, fold.end)
    }
}


impl<'a> Iterator for CrossValidation<'a> {
    type Item = (Sample, Sample);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.folds.len() { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            let train_size = output.0.len();
            let test_size = output.1.len();
            println!(
                "{}    {}    {}",
                format!("  [{: >3}'th fold]", self.current_fold).bold().red(),
                format!("[TRAIN {:>WIDTH$}]", train_size).bold().green(),
                format!("[TEST {:>WIDTH$}]", test_size).bold().yellow(),
            );
        }

        Some(output)
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.folds.len() - self.current_fold;
        (rest, Some(rest))
    }
}


impl<'a> ExactSizeIterator for CrossValidation<'a> {}
