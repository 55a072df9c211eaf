//! Errors returned by the model builders and the cross validator.
use thiserror::Error;

use crate::downsampling::ClassificationProportions;
use crate::sample::Instance;


/// A shorthand for `Result` with [`MiniBalanceError`].
pub type Result<T> = std::result::Result<T, MiniBalanceError>;


/// Errors returned by this crate.
/// Every error is a hard stop for the call that produced it;
/// nothing is retried or recovered internally.
#[derive(Debug, Error)]
pub enum MiniBalanceError {
    /// A constructor argument or a configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The training sample does not have exactly two labels.
    #[error(
        "training data must contain exactly 2 labels, \
         but it had {observed_label_count}. proportions: {proportions}"
    )]
    InvalidTrainingData {
        /// Number of distinct labels found in the sample.
        observed_label_count: usize,
        /// The label proportions found in the sample.
        proportions: ClassificationProportions,
        /// A few instances of the least frequent label,
        /// kept for inspection.
        diagnostic_sample: Vec<Instance>,
    },

    /// An operation required a non-empty sample.
    #[error("the sample has no instances")]
    EmptyDataset,

    /// The inner model builder cannot update a trained model.
    #[error("cannot update a model without an updatable model builder")]
    UnsupportedUpdate,

    /// The inner model builder lacks the requested operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
