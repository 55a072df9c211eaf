//! Tools to evaluate a model builder with k-fold cross validation.
mod fold_splitter;
mod cross_validation;
mod cross_validator;
pub mod loss_functions;

pub use fold_splitter::{Fold, FoldSplitter};
pub use cross_validation::CrossValidation;
pub use cross_validator::{CrossValidator, CrossValidationResult};
pub use loss_functions::{
    ClassifierLossFunction,
    LabelPredictionWeight,
    LossFunctionResult,
    ZeroOneLoss,
    LogLoss,
    BrierLoss,
};
