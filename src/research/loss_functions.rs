//! Loss functions that score a classifier on held-out data.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::classifier::PredictionMap;
use crate::common::checker;
use crate::error::{Result, MiniBalanceError};
use crate::sample::Label;


/// The true label of a test instance,
/// the prediction made for it, and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPredictionWeight {
    label: Label,
    prediction: PredictionMap,
    weight: f64,
}


impl LabelPredictionWeight {
    /// Construct a new instance of `LabelPredictionWeight`.
    #[inline]
    pub fn new(label: Label, prediction: PredictionMap, weight: f64) -> Self {
        Self { label, prediction, weight, }
    }


    /// Returns the true label.
    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }


    /// Returns the prediction.
    #[inline]
    pub fn prediction(&self) -> &PredictionMap {
        &self.prediction
    }


    /// Returns the weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}


/// A loss computed over the test set of a single fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossFunctionResult {
    /// Name of the loss function.
    pub name: String,
    /// Loss value.
    pub loss: f64,
}


impl fmt::Display for LossFunctionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.6}", self.name, self.loss)
    }
}


/// A loss function over the predictions for a set of test instances.
/// Lower is better.
pub trait ClassifierLossFunction {
    /// Returns the name of this loss.
    fn name(&self) -> &str;


    /// Computes the loss.
    /// Returns `MiniBalanceError::EmptyDataset`
    /// if `results` is empty or carries no weight.
    fn loss(&self, results: &[LabelPredictionWeight]) -> Result<f64>;
}


impl<L> ClassifierLossFunction for &L
    where L: ClassifierLossFunction + ?Sized
{
    fn name(&self) -> &str {
        (**self).name()
    }


    fn loss(&self, results: &[LabelPredictionWeight]) -> Result<f64> {
        (**self).loss(results)
    }
}


/// Weighted mean of `per_instance` over `results`.
fn weighted_mean<F>(results: &[LabelPredictionWeight], per_instance: F)
    -> Result<f64>
    where F: Fn(&LabelPredictionWeight) -> f64
{
    let total = results.iter()
        .map(|r| r.weight)
        .sum::<f64>();

    if results.is_empty() || total <= 0f64 {
        return Err(MiniBalanceError::EmptyDataset);
    }

    let loss = results.iter()
        .map(|r| r.weight * per_instance(r))
        .sum::<f64>();
    Ok(loss / total)
}


/// Weighted fraction of misclassified instances.
/// An instance counts as misclassified
/// when the most likely label is not its true label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroOneLoss;


impl ZeroOneLoss {
    /// Construct a new instance of `ZeroOneLoss`.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}


impl ClassifierLossFunction for ZeroOneLoss {
    fn name(&self) -> &str {
        "zero-one loss"
    }


    fn loss(&self, results: &[LabelPredictionWeight]) -> Result<f64> {
        weighted_mean(results, |r| {
            match r.prediction.most_likely() {
                Some(label) if label == &r.label => 0f64,
                _ => 1f64,
            }
        })
    }
}


/// Weighted negative log-likelihood of the true label.
/// Probabilities are clamped from below to avoid infinite losses.
#[derive(Debug, Clone, Copy)]
pub struct LogLoss {
    min_probability: f64,
}


impl LogLoss {
    /// Construct a new instance of `LogLoss`.
    #[inline]
    pub fn new() -> Self {
        Self { min_probability: 1e-15 }
    }


    /// Set the smallest probability used in the logarithm.
    /// The value must lie in `(0, 1)`;
    /// `loss` returns `MiniBalanceError::InvalidConfiguration` otherwise.
    /// Default value is `1e-15`.
    #[inline]
    pub fn min_probability(mut self, min_probability: f64) -> Self {
        self.min_probability = min_probability;
        self
    }
}


impl Default for LogLoss {
    fn default() -> Self {
        Self::new()
    }
}


impl ClassifierLossFunction for LogLoss {
    fn name(&self) -> &str {
        "log loss"
    }


    fn loss(&self, results: &[LabelPredictionWeight]) -> Result<f64> {
        checker::check_open_unit_interval(
            "min_probability", self.min_probability
        )?;
        weighted_mean(results, |r| {
            let p = r.prediction.get(&r.label).max(self.min_probability);
            -p.ln()
        })
    }
}


/// Weighted Brier score.
/// For an instance of label `y`, the loss is
/// `(1 - p_y)^2 + sum_{l != y} p_l^2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrierLoss;


impl BrierLoss {
    /// Construct a new instance of `BrierLoss`.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}


impl ClassifierLossFunction for BrierLoss {
    fn name(&self) -> &str {
        "Brier score"
    }


    fn loss(&self, results: &[LabelPredictionWeight]) -> Result<f64> {
        weighted_mean(results, |r| {
            let others = r.prediction.iter()
                .filter(|(label, _)| *label != &r.label)
                .map(|(_, p)| p * p)
                .sum::<f64>();
            let miss = 1f64 - r.prediction.get(&r.label);
            miss * miss + others
        })
    }
}
