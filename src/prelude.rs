//! Exports the standard builders, models, and traits.
//! 
pub use crate::sample::{
    Sample,
    Instance,
    Label,
    AttributeValue,
    Attributes,
};


pub use crate::classifier::{
    Classifier,
    PredictionMap,
};


pub use crate::model_builder::{
    ModelBuilder,
    UpdatableModelBuilder,
};


pub use crate::downsampling::{
    DownsamplingClassifierBuilder,
    DownsamplingClassifier,
};


pub use crate::decision_tree::{
    DTreeBuilder,
    DTreeClassifier,
    Criterion,
};


pub use crate::research::{
    CrossValidator,
    CrossValidationResult,
    ClassifierLossFunction,
    ZeroOneLoss,
    LogLoss,
    BrierLoss,
};


pub use crate::error::{
    MiniBalanceError,
    Result,
};
