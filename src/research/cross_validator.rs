use rand::prelude::*;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use std::fmt;

use crate::classifier::Classifier;
use crate::common::checker;
use crate::config::{CrossValidationConfig, DEFAULT_SEED};
use crate::error::Result;
use crate::model_builder::ModelBuilder;
use crate::sample::Sample;
use super::cross_validation::CrossValidation;
use super::loss_functions::{
    ClassifierLossFunction,
    LabelPredictionWeight,
    LossFunctionResult,
};


/// Per-fold losses of a cross validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Name of the loss function.
    pub loss_name: String,
    /// The loss of each fold, in fold order.
    pub folds: Vec<LossFunctionResult>,
}


impl CrossValidationResult {
    /// Returns the number of folds.
    #[inline]
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }


    /// Returns the loss of each fold.
    pub fn fold_losses(&self) -> Vec<f64> {
        self.folds.iter()
            .map(|r| r.loss)
            .collect()
    }


    /// Returns the mean loss over the folds.
    pub fn mean(&self) -> f64 {
        if self.folds.is_empty() { return 0f64; }
        self.folds.iter()
            .map(|r| r.loss)
            .sum::<f64>()
            / self.folds.len() as f64
    }


    /// Returns the (population) standard deviation of the fold losses.
    pub fn std_dev(&self) -> f64 {
        if self.folds.is_empty() { return 0f64; }
        let mean = self.mean();
        let var = self.folds.iter()
            .map(|r| (r.loss - mean).powi(2))
            .sum::<f64>()
            / self.folds.len() as f64;
        var.sqrt()
    }
}


impl fmt::Display for CrossValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------")?;
        writeln!(f, "# Cross validation ({})\n", self.loss_name)?;
        for (i, r) in self.folds.iter().enumerate() {
            writeln!(f, "- Fold {: >3}: {:.6}", i + 1, r.loss)?;
        }
        writeln!(f, "- Mean: {:.6}", self.mean())?;
        writeln!(f, "- Std. dev.: {:.6}", self.std_dev())?;
        write!(f, "----------")
    }
}


/// Runs k-fold cross validation of a `ModelBuilder`
/// and scores each fold with a `ClassifierLossFunction`.
/// 
/// Every fold trains a fresh model
/// with its own random source seeded by `seed + i`,
/// so the result only depends on the inputs.
/// 
/// # Example
/// ```
/// use minibalance::prelude::*;
/// use minibalance::{CrossValidator, ZeroOneLoss};
/// 
/// let sample = (0..40)
///     .map(|i| {
///         let x = i as f64;
///         Instance::from_pairs([("x", x)], if x < 20.0 { 0 } else { 1 })
///     })
///     .collect::<Sample>();
/// 
/// let builder = DTreeBuilder::new().max_depth(2);
/// let result = CrossValidator::new(4, ZeroOneLoss::new())
///     .unwrap()
///     .shuffle(true)
///     .cross_validated_loss(&builder, &sample)
///     .unwrap();
/// assert_eq!(result.n_folds(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct CrossValidator<L> {
    n_folds: usize,
    loss: L,
    seed: u64,
    shuffle: bool,
    verbose: bool,
}


impl<L> CrossValidator<L>
    where L: ClassifierLossFunction
{
    /// Construct a new instance of `CrossValidator`.
    /// `n_folds` must be at least `2`.
    pub fn new(n_folds: usize, loss: L) -> Result<Self> {
        checker::check_n_folds(n_folds)?;
        Ok(Self {
            n_folds,
            loss,
            seed: DEFAULT_SEED,
            shuffle: false,
            verbose: false,
        })
    }


    /// Construct a new instance of `CrossValidator` from a configuration.
    pub fn from_config(config: &CrossValidationConfig, loss: L)
        -> Result<Self>
    {
        config.validate()?;
        let cv = Self::new(config.folds, loss)?
            .seed(config.seed)
            .shuffle(config.shuffle)
            .verbose(config.verbose);
        Ok(cv)
    }


    /// Set the seed of the randomness.
    /// The seed drives both the shuffling and the model training.
    /// Default value is `1234`.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Shuffle the rows before splitting.
    /// Default value is `false`.
    #[inline]
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }


    /// Print a line per fold.
    /// Default value is `false`.
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Returns the number of folds.
    #[inline]
    pub fn n_folds(&self) -> usize {
        self.n_folds
    }


    /// Returns the loss function.
    #[inline]
    pub fn loss(&self) -> &L {
        &self.loss
    }


    /// Computes the loss of each fold, one fold after another.
    pub fn cross_validated_loss<B>(&self, builder: &B, sample: &Sample)
        -> Result<CrossValidationResult>
        where B: ModelBuilder
    {
        info!(
            builder = builder.name(),
            folds = self.n_folds,
            instances = sample.len(),
            "cross validation started"
        );
        let folds = self.pairs(sample)?
            .enumerate()
            .map(|(i, (train, test))| self.run_fold(builder, i, &train, &test))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.result(folds))
    }


    /// Computes the loss of each fold on the `rayon` thread pool.
    /// Returns the same result as `cross_validated_loss`.
    pub fn par_cross_validated_loss<B>(&self, builder: &B, sample: &Sample)
        -> Result<CrossValidationResult>
        where B: ModelBuilder + Sync,
              L: Sync,
    {
        info!(
            builder = builder.name(),
            folds = self.n_folds,
            instances = sample.len(),
            "parallel cross validation started"
        );
        let pairs = self.pairs(sample)?.collect::<Vec<_>>();
        let folds = pairs.into_par_iter()
            .enumerate()
            .map(|(i, (train, test))| self.run_fold(builder, i, &train, &test))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.result(folds))
    }


    fn pairs<'a>(&self, sample: &'a Sample) -> Result<CrossValidation<'a>> {
        let cv = CrossValidation::new(sample, self.n_folds)?
            .seed(self.seed)
            .verbose(self.verbose);

        if self.shuffle { Ok(cv.shuffle()) } else { Ok(cv) }
    }


    /// Train a fresh model on `train`
    /// and score its predictions on `test`.
    /// The loss function is called exactly once.
    fn run_fold<B>(
        &self,
        builder: &B,
        index: usize,
        train: &Sample,
        test: &Sample,
    ) -> Result<LossFunctionResult>
        where B: ModelBuilder
    {
        let span = tracing::debug_span!("fold", index);
        let _enter = span.enter();

        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));
        let model = builder.build_model(train, &mut rng)?;

        let results = test.iter()
            .map(|instance| {
                LabelPredictionWeight::new(
                    instance.label().clone(),
                    model.predict(instance.attributes()),
                    instance.weight(),
                )
            })
            .collect::<Vec<_>>();

        let loss = self.loss.loss(&results)?;
        debug!(train = train.len(), test = test.len(), loss, "fold evaluated");

        Ok(LossFunctionResult { name: self.loss.name().to_string(), loss })
    }


    fn result(&self, folds: Vec<LossFunctionResult>) -> CrossValidationResult {
        CrossValidationResult {
            loss_name: self.loss.name().to_string(),
            folds,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MiniBalanceError;

    fn result(losses: &[f64]) -> CrossValidationResult {
        CrossValidationResult {
            loss_name: "test".to_string(),
            folds: losses.iter()
                .map(|&loss| LossFunctionResult { name: "test".into(), loss })
                .collect(),
        }
    }

    #[test]
    fn mean_and_std_dev() {
        let r = result(&[1.0, 2.0, 3.0, 4.0]);
        assert!((r.mean() - 2.5).abs() < 1e-12);
        assert!((r.std_dev() - 1.25_f64.sqrt()).abs() < 1e-12);
        assert_eq!(r.fold_losses(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn fewer_than_two_folds_is_rejected() {
        use crate::research::loss_functions::ZeroOneLoss;
        assert!(matches!(
            CrossValidator::new(1, ZeroOneLoss::new()),
            Err(MiniBalanceError::InvalidConfiguration(_))
        ));
    }
}
