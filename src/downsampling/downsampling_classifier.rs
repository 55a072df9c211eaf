//! Defines the classifier produced by `DownsamplingClassifierBuilder`.
use serde::{Serialize, Deserialize};

use crate::{Classifier, PredictionMap};
use crate::sample::{Label, Attributes};


/// A trained classifier together with the downsampling
/// that was applied to its training data.
/// 
/// The labels and the drop probability are fixed when the model is built
/// and are reused by every later update, so that new data is downsampled
/// exactly as the original data was.
/// Only the wrapped model changes over the lifetime of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownsamplingClassifier<M> {
    wrapped: M,
    majority_label: Label,
    minority_label: Label,
    drop_probability: f64,
}


impl<M> DownsamplingClassifier<M> {
    #[inline]
    pub(super) fn new(
        wrapped: M,
        majority_label: Label,
        minority_label: Label,
        drop_probability: f64,
    ) -> Self
    {
        Self { wrapped, majority_label, minority_label, drop_probability, }
    }


    /// Returns the wrapped model.
    #[inline]
    pub fn wrapped(&self) -> &M {
        &self.wrapped
    }


    /// Returns the wrapped model mutably.
    /// Used by the update path of the builder.
    #[inline]
    pub fn wrapped_mut(&mut self) -> &mut M {
        &mut self.wrapped
    }


    /// Consumes `self` and returns the wrapped model.
    #[inline]
    pub fn into_inner(self) -> M {
        self.wrapped
    }


    /// Returns the label that was downsampled.
    #[inline]
    pub fn majority_label(&self) -> &Label {
        &self.majority_label
    }


    /// Returns the rarer label.
    #[inline]
    pub fn minority_label(&self) -> &Label {
        &self.minority_label
    }


    /// Returns the probability with which a majority instance was dropped.
    #[inline]
    pub fn drop_probability(&self) -> f64 {
        self.drop_probability
    }
}


impl<M: Classifier> DownsamplingClassifier<M> {
    /// Returns the probability of `label` with the downsampling bias
    /// removed.
    /// 
    /// Keeping a majority instance with probability `k = 1 - drop`
    /// divides the odds of the minority label by `k`.
    /// This method multiplies them back:
    /// ```text
    /// p' = p k / (p k + (1 - p))
    /// ```
    /// where `p` is the wrapped model's probability of the minority label.
    /// Labels other than the majority/minority ones get `0`.
    pub fn unbiased_probability_of(
        &self,
        attributes: &Attributes,
        label: &Label,
    ) -> f64
    {
        let keep = 1f64 - self.drop_probability;
        let p = self.wrapped.probability_of(attributes, &self.minority_label);

        let denominator = p * keep + (1f64 - p);
        let minority = if denominator > 0f64 {
            p * keep / denominator
        } else {
            0f64
        };

        if label == &self.minority_label {
            minority
        } else if label == &self.majority_label {
            1f64 - minority
        } else {
            0f64
        }
    }
}


/// Predictions are delegated to the wrapped model unchanged;
/// see [`DownsamplingClassifier::unbiased_probability_of`]
/// for bias-corrected probabilities.
impl<M: Classifier> Classifier for DownsamplingClassifier<M> {
    #[inline]
    fn predict(&self, attributes: &Attributes) -> PredictionMap {
        self.wrapped.predict(attributes)
    }


    #[inline]
    fn classify(&self, attributes: &Attributes) -> Label {
        self.wrapped.classify(attributes)
    }


    #[inline]
    fn probability_of(&self, attributes: &Attributes, label: &Label) -> f64 {
        self.wrapped.probability_of(attributes, label)
    }
}
