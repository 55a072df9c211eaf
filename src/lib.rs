#![warn(missing_docs)]

//! 
//! A crate that rebalances skewed binary training data
//! and evaluates the resulting classifiers with k-fold cross validation.
//! 
//! - Downsampling
//!     `DownsamplingClassifierBuilder` wraps any `ModelBuilder`.
//!     Before training, it drops majority-labeled instances at random
//!     so that the minority label reaches a target proportion
//!     in expectation.
//!     The trained model is returned as a `DownsamplingClassifier`
//!     that remembers the drop probability,
//!     so that later incremental updates are filtered the same way.
//! 
//! 
//! - Cross validation
//!     `CrossValidator` trains a fresh model per fold
//!     and scores the held-out fold with a `ClassifierLossFunction`
//!     such as `ZeroOneLoss`, `LogLoss`, or `BrierLoss`.
//! 
//! 
//! `DTreeBuilder` is an updatable decision tree learner
//! that can be used as the inner builder.
//! 
//! ```
//! use rand::prelude::*;
//! use minibalance::prelude::*;
//! 
//! let sample = (0..100)
//!     .map(|i| {
//!         let x = i as f64;
//!         Instance::from_pairs([("x", x)], if i % 10 == 0 { 1 } else { 0 })
//!     })
//!     .collect::<Sample>();
//! 
//! let builder = DownsamplingClassifierBuilder::with_updates(
//!     DTreeBuilder::new().max_depth(3),
//!     0.5,
//! ).unwrap();
//! 
//! let mut rng = StdRng::seed_from_u64(1234);
//! let model = builder.build_model(&sample, &mut rng).unwrap();
//! assert!(model.drop_probability() > 0.8);
//! ```

pub mod sample;
pub mod classifier;
pub mod model_builder;
pub mod downsampling;
pub mod decision_tree;
pub mod research;
pub mod config;
pub mod error;
pub mod prelude;

pub(crate) mod common;


pub use sample::{
    Sample,
    Instance,
    Label,
    AttributeValue,
    Attributes,
};


pub use classifier::{
    Classifier,
    PredictionMap,
};


pub use model_builder::{
    ModelBuilder,
    UpdatableModelBuilder,
    ModelId,
};


pub use downsampling::{
    ClassificationProportions,
    drop_probability,
    MajorityDropFilter,
    StochasticMajorityFilter,
    DownsamplingClassifierBuilder,
    DownsamplingClassifier,
    UpdateCapability,
    DIAGNOSTIC_SAMPLE_SIZE,
};


pub use decision_tree::{
    DTreeBuilder,
    DTreeClassifier,
    Criterion,
    DEFAULT_MAX_DEPTH,
};


pub use research::{
    Fold,
    FoldSplitter,
    CrossValidation,
    CrossValidator,
    CrossValidationResult,
    ClassifierLossFunction,
    LabelPredictionWeight,
    LossFunctionResult,
    ZeroOneLoss,
    LogLoss,
    BrierLoss,
};


pub use config::{
    DownsamplingConfig,
    CrossValidationConfig,
};


pub use error::{
    MiniBalanceError,
    Result,
};
