//! An updatable decision tree.
//! 
//! [`DTreeBuilder`] grows a [`DTreeClassifier`] by recursive binary
//! splitting. Built with `updatable(true)`, every leaf keeps the
//! instances that reached it, so that later updates can grow new
//! subtrees from the leaves (see
//! [`UpdatableModelBuilder`](crate::UpdatableModelBuilder)).

/// Defines the decision tree builder.
pub mod builder;
/// Defines the classifier produced by `DTreeBuilder`.
pub mod dtree_classifier;

/// Defines the inner representations of `DTreeClassifier`.
mod node;
mod criterion;
mod split_rule;


pub use builder::{DTreeBuilder, DEFAULT_MAX_DEPTH};
pub use dtree_classifier::DTreeClassifier;
pub use criterion::Criterion;
