//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use crate::{Classifier, PredictionMap};
use crate::model_builder::ModelId;
use crate::sample::{Label, Attributes};

use super::node::*;


/// Decision tree classifier.
/// This struct is just a wrapper of `Node`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DTreeClassifier {
    pub(super) root: Node,
    pub(super) id: Option<ModelId>,
}


impl DTreeClassifier {
    #[inline]
    pub(super) fn new(root: Node, id: Option<ModelId>) -> Self {
        Self { root, id }
    }


    /// Returns the number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.root.size()
    }


    /// Returns the mean depth of the leaves.
    /// The root has depth `0`.
    pub fn mean_depth(&self) -> f64 {
        let (sum, n_leaves) = self.root.depth_stats(0);
        sum as f64 / n_leaves as f64
    }


    /// Returns the number of training instances kept in the leaves.
    #[inline]
    pub fn retained_instances(&self) -> usize {
        self.root.retained()
    }


    /// Returns the identifier given by the builder, if any.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}


impl Classifier for DTreeClassifier {
    #[inline]
    fn predict(&self, attributes: &Attributes) -> PredictionMap {
        self.root.leaf(attributes).predict()
    }


    #[inline]
    fn classify(&self, attributes: &Attributes) -> Label {
        self.root.leaf(attributes).label.clone()
    }
}
