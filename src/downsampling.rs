//! The files in `downsampling/` directory define
//! the downsampling model builder and its building blocks.
//!
//! Given a two-label training sample whose minority label is rarer than
//! a target proportion, [`DownsamplingClassifierBuilder`]
//! 1. computes the label proportions ([`ClassificationProportions`]),
//! 2. derives the probability of dropping a majority instance
//!     ([`drop_probability`]),
//! 3. drops majority instances at random ([`MajorityDropFilter`]), and
//! 4. trains the wrapped builder on what remains.
//!
//! The result is a [`DownsamplingClassifier`] that remembers
//! the labels and the drop probability,
//! so that later updates are downsampled the same way.

/// Label proportions of a sample.
pub mod proportions;
/// The drop probability for majority instances.
pub mod drop_probability;
/// Random dropping of majority instances.
pub mod filter;
/// Defines the downsampling model builder.
pub mod downsampling_builder;
/// Defines the classifier produced by `DownsamplingClassifierBuilder`.
pub mod downsampling_classifier;


pub use proportions::ClassificationProportions;
pub use drop_probability::drop_probability;
pub use filter::{MajorityDropFilter, StochasticMajorityFilter};
pub use downsampling_builder::{
    DownsamplingClassifierBuilder,
    UpdateCapability,
    DIAGNOSTIC_SAMPLE_SIZE,
};
pub use downsampling_classifier::DownsamplingClassifier;
