//! Defines the inner representation 
//! of the Decision Tree class.
use serde::{Serialize, Deserialize};

use std::collections::BTreeMap;

use crate::PredictionMap;
use crate::sample::{Instance, Label, Attributes};

use super::split_rule::*;


/// Label weights of a leaf.
pub(super) type LabelWeights = BTreeMap<Label, f64>;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


/// Represents the leaf nodes of decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    #[serde(with = "crate::sample::label::label_map")]
    pub(super) weights: LabelWeights,
    pub(super) label: Label,
    pub(super) depth: usize,
    /// The instances that reached this leaf.
    /// `None` unless the tree was built to be updated.
    pub(super) data: Option<Vec<Instance>>,
}


impl LeafNode {
    /// Returns a `LeafNode` that predicts
    /// the heaviest label of `weights`.
    /// `weights` must have at least one label.
    #[inline]
    pub(super) fn new(
        weights: LabelWeights,
        depth: usize,
        data: Option<Vec<Instance>>,
    ) -> Option<Self>
    {
        let label = heaviest(&weights)?.clone();
        Some(Self { weights, label, depth, data, })
    }


    /// Adds `instance` to the statistics of this leaf.
    pub(super) fn absorb(&mut self, instance: &Instance) {
        *self.weights.entry(instance.label().clone()).or_insert(0f64)
            += instance.weight();
        if let Some(label) = heaviest(&self.weights) {
            self.label = label.clone();
        }
        if let Some(data) = self.data.as_mut() {
            data.push(instance.clone());
        }
    }


    #[inline]
    pub(super) fn predict(&self) -> PredictionMap {
        PredictionMap::from_weights(&self.weights)
    }
}


impl Node {
    /// Returns the leaf that `attributes` reaches.
    pub(super) fn leaf(&self, attributes: &Attributes) -> &LeafNode {
        match self {
            Node::Branch(node) => {
                match node.rule.split(attributes) {
                    LR::Left => node.left.leaf(attributes),
                    LR::Right => node.right.leaf(attributes),
                }
            },
            Node::Leaf(leaf) => leaf,
        }
    }


    /// Returns the leaf that `attributes` reaches, mutably.
    pub(super) fn leaf_mut(&mut self, attributes: &Attributes)
        -> &mut LeafNode
    {
        match self {
            Node::Branch(node) => {
                match node.rule.split(attributes) {
                    LR::Left => node.left.leaf_mut(attributes),
                    LR::Right => node.right.leaf_mut(attributes),
                }
            },
            Node::Leaf(leaf) => leaf,
        }
    }


    /// Returns the number of nodes.
    pub(super) fn size(&self) -> usize {
        match self {
            Node::Branch(node) => 1 + node.left.size() + node.right.size(),
            Node::Leaf(_) => 1,
        }
    }


    /// Returns `(sum of leaf depths, number of leaves)`.
    pub(super) fn depth_stats(&self, depth: usize) -> (usize, usize) {
        match self {
            Node::Branch(node) => {
                let (ls, ln) = node.left.depth_stats(depth + 1);
                let (rs, rn) = node.right.depth_stats(depth + 1);
                (ls + rs, ln + rn)
            },
            Node::Leaf(_) => (depth, 1),
        }
    }


    /// Returns the number of instances kept in the leaves.
    pub(super) fn retained(&self) -> usize {
        match self {
            Node::Branch(node) => node.left.retained() + node.right.retained(),
            Node::Leaf(leaf) => leaf.data.as_ref().map_or(0, Vec::len),
        }
    }


    /// Drops the instances kept in the leaves.
    pub(super) fn strip(&mut self) {
        match self {
            Node::Branch(node) => {
                node.left.strip();
                node.right.strip();
            },
            Node::Leaf(leaf) => { leaf.data = None; },
        }
    }
}


/// Returns the label of the largest weight.
/// Ties are broken toward the smallest label.
pub(super) fn heaviest(weights: &LabelWeights) -> Option<&Label> {
    weights.iter()
        .fold(None, |best: Option<(&Label, f64)>, (label, &w)| {
            match best {
                Some((_, v)) if v >= w => best,
                _ => Some((label, w)),
            }
        })
        .map(|(label, _)| label)
}
