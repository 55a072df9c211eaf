//! The contract between the rebalancing layer and the learner it wraps.
//!
//! A [`ModelBuilder`] trains a [`Classifier`] from a [`Sample`].
//! A builder that can also revise a trained model with new data
//! implements [`UpdatableModelBuilder`].
//!
//! Every method that may draw random numbers takes the random source
//! explicitly, so that the same seed always reproduces the same model,
//! no matter how many builds run concurrently.
use rand::rngs::StdRng;

use crate::Classifier;
use crate::error::Result;
use crate::sample::Sample;


/// An identifier handed down to the models a builder produces.
pub type ModelId = String;


/// A trait that trains a classifier from a sample.
pub trait ModelBuilder {
    /// The trained model.
    type Model: Classifier;


    /// Returns the name of this builder.
    fn name(&self) -> &str;


    /// Trains a fresh model on `sample`.
    fn build_model(&self, sample: &Sample, rng: &mut StdRng)
        -> Result<Self::Model>;


    /// Tell the builder whether its models will be updated later.
    /// Builders that keep no training data ignore this flag.
    fn updatable(&mut self, _updatable: bool) -> &mut Self
        where Self: Sized
    {
        self
    }


    /// Set the identifier of the models built hereafter.
    fn set_id(&mut self, _id: ModelId) {}
}


/// A model builder that revises already-trained models in place.
pub trait UpdatableModelBuilder: ModelBuilder {
    /// Updates `model` with `sample`.
    /// The model reachable through `model` is mutated in place;
    /// callers holding the same model must serialize their updates.
    /// If `split_nodes` is `true`, the builder may grow the model
    /// structure, otherwise only its statistics change.
    fn update_model(
        &self,
        model: &mut Self::Model,
        sample: &Sample,
        split_nodes: bool,
        rng: &mut StdRng,
    ) -> Result<()>;


    /// Drops the training data retained inside `model`.
    /// The predictions and the structure of `model` stay the same.
    fn strip_data(&self, model: &mut Self::Model) -> Result<()>;
}
