use rand::Rng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

use std::fmt;
use std::collections::{BTreeMap, BTreeSet};

use crate::common::checker;
use crate::error::{Result, MiniBalanceError};
use crate::model_builder::{ModelBuilder, UpdatableModelBuilder, ModelId};
use crate::sample::{Instance, Sample};

use super::criterion::Criterion;
use super::dtree_classifier::DTreeClassifier;
use super::node::*;
use super::split_rule::*;


/// The maximal depth set as default.
pub const DEFAULT_MAX_DEPTH: usize = 5;
/// Splits that decrease the impurity by less than this are ignored.
const MIN_GAIN: f64 = 1e-12;


/// A struct that builds [`DTreeClassifier`].
/// `DTreeBuilder` keeps parameters for constructing `DTreeClassifier`.
/// 
/// # Example
/// 
/// ```no_run
/// use minibalance::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// 
/// # fn run(sample: Sample) -> minibalance::Result<()> {
/// let mut tree = DTreeBuilder::new()
///     .max_depth(3)
///     .criterion(Criterion::Entropy);
/// tree.updatable(true);
/// 
/// let mut rng = StdRng::seed_from_u64(1234);
/// let f = tree.build_model(&sample, &mut rng)?;
/// println!("{} nodes", f.size());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DTreeBuilder {
    max_depth: usize,
    min_leaf_instances: usize,
    min_split_instances: usize,
    criterion: Criterion,
    ignore_attribute_probability: f64,
    updatable: bool,
    id: Option<ModelId>,
}


impl Default for DTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}


impl DTreeBuilder {
    /// Construct a new instance of [`DTreeBuilder`].
    /// By default, [`DTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// max_depth: DEFAULT_MAX_DEPTH == 5,
    /// min_leaf_instances: 1,
    /// min_split_instances: 2,
    /// criterion: Criterion::Entropy,
    /// ignore_attribute_probability: 0.0,
    /// ```
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_instances: 1,
            min_split_instances: 2,
            criterion: Criterion::Entropy,
            ignore_attribute_probability: 0f64,
            updatable: false,
            id: None,
        }
    }


    /// Specify the maximal depth of the tree.
    /// Default maximal depth is `5`.
    #[inline]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }


    /// Specify the minimal number of instances in a leaf.
    /// Default value is `1`.
    #[inline]
    pub fn min_leaf_instances(mut self, n: usize) -> Self {
        self.min_leaf_instances = n;
        self
    }


    /// Specify the minimal number of instances to split a node.
    /// Default value is `2`.
    #[inline]
    pub fn min_split_instances(mut self, n: usize) -> Self {
        self.min_split_instances = n;
        self
    }


    /// Set the node splitting rule.
    /// Default value is `Criterion::Entropy`.
    /// See [`Criterion`] for other rules.
    #[inline]
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }


    /// Set the probability of ignoring an attribute at each node.
    /// Default value is `0.0`.
    #[inline]
    pub fn ignore_attribute_probability(mut self, p: f64) -> Self {
        self.ignore_attribute_probability = p;
        self
    }


    fn check(&self) -> Result<()> {
        checker::check_positive("max_depth", self.max_depth)?;
        checker::check_positive("min_leaf_instances", self.min_leaf_instances)?;
        checker::check_positive(
            "min_split_instances", self.min_split_instances
        )?;
        checker::check_unit_interval(
            "ignore_attribute_probability", self.ignore_attribute_probability
        )
    }


    /// Grow a tree of root depth `depth` from `instances`.
    fn grow(&self, instances: Vec<Instance>, depth: usize, rng: &mut StdRng)
        -> Result<Node>
    {
        let mut weights = LabelWeights::new();
        for instance in instances.iter() {
            *weights.entry(instance.label().clone()).or_insert(0f64)
                += instance.weight();
        }

        let splittable = depth < self.max_depth
            && instances.len() >= self.min_split_instances
            && weights.len() > 1;
        let rule = if splittable {
            self.best_split(&instances, &weights, rng)
        } else {
            None
        };

        let Some(rule) = rule else {
            return self.leaf(weights, depth, instances);
        };

        let (left, right): (Vec<_>, Vec<_>) = instances.into_iter()
            .partition(|x| rule.split(x.attributes()) == LR::Left);

        // If the split has no meaning, construct a leaf node.
        if left.is_empty() || right.is_empty() {
            let instances = left.into_iter().chain(right).collect();
            return self.leaf(weights, depth, instances);
        }

        let left = self.grow(left, depth + 1, rng)?;
        let right = self.grow(right, depth + 1, rng)?;
        Ok(Node::Branch(BranchNode {
            rule,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }


    fn leaf(&self, weights: LabelWeights, depth: usize, data: Vec<Instance>)
        -> Result<Node>
    {
        let data = self.updatable.then_some(data);
        LeafNode::new(weights, depth, data)
            .map(Node::Leaf)
            .ok_or(MiniBalanceError::EmptyDataset)
    }


    /// Returns the split of the largest impurity decrease, if any.
    /// Ties go to the first candidate in (attribute name, threshold) order.
    fn best_split(
        &self,
        instances: &[Instance],
        weights: &LabelWeights,
        rng: &mut StdRng,
    ) -> Option<Splitter>
    {
        let labels = weights.keys().collect::<Vec<_>>();
        let totals = weights.values().copied().collect::<Vec<_>>();
        let label_ix = instances.iter()
            .map(|x| labels.binary_search(&x.label()).unwrap_or_default())
            .collect::<Vec<_>>();
        let parent = self.criterion.impurity(&totals);

        let names = instances.iter()
            .flat_map(|x| x.attributes().keys().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|_| {
                let p = self.ignore_attribute_probability;
                p == 0f64 || !rng.gen_bool(p)
            })
            .collect::<Vec<_>>();

        let node = NodeStats { instances, label_ix: &label_ix, totals: &totals };
        names.into_par_iter()
            .map(|name| {
                let numeric = self.best_threshold(&node, name);
                let categorical = self.best_category(&node, name);
                match (numeric, categorical) {
                    (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
                    (a, b) => a.or(b),
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .map(|(score, rule)| (parent - score, rule))
            .fold(None, |best: Option<(f64, Splitter)>, (gain, rule)| {
                match best {
                    Some((g, _)) if g >= gain => best,
                    _ if gain > MIN_GAIN => Some((gain, rule)),
                    _ => best,
                }
            })
            .map(|(_, rule)| rule)
    }


    /// Returns the `(split impurity, rule)` pair
    /// of the best threshold on `name`.
    fn best_threshold(&self, node: &NodeStats<'_>, name: &str)
        -> Option<(f64, Splitter)>
    {
        let mut points = node.instances.iter()
            .zip(node.label_ix)
            .filter_map(|(x, &k)| {
                let v = x.attribute(name)?.as_f64()?;
                Some((v, k, x.weight()))
            })
            .collect::<Vec<_>>();
        if points.len() < 2 { return None; }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n_total = node.instances.len();
        let mut left = vec![0f64; node.totals.len()];
        let mut right = node.totals.to_vec();
        let mut best: Option<(f64, f64)> = None;
        for (i, window) in points.windows(2).enumerate() {
            let (v, k, w) = window[0];
            let next = window[1].0;
            left[k] += w;
            right[k] -= w;

            if !(v < next) { continue; }

            let n_left = i + 1;
            let n_right = n_total - n_left;
            if n_left < self.min_leaf_instances
                || n_right < self.min_leaf_instances
            {
                continue;
            }

            let score = self.criterion.split_impurity(&left, &right);
            if best.map_or(true, |(s, _)| score < s) {
                best = Some((score, v + (next - v) / 2f64));
            }
        }

        best.map(|(score, threshold)| {
            let rule = Splitter::Threshold {
                attribute: name.to_string(),
                threshold,
            };
            (score, rule)
        })
    }


    fn best_category(&self, node: &NodeStats<'_>, name: &str)
        -> Option<(f64, Splitter)>
    {
        let n_labels = node.totals.len();
        let mut groups: BTreeMap<&str, (Vec<f64>, usize)> = BTreeMap::new();
        for (x, &k) in node.instances.iter().zip(node.label_ix) {
            let category = x.attribute(name).and_then(|v| v.as_str());
            let Some(category) = category else { continue; };
            let (weights, count) = groups.entry(category)
                .or_insert_with(|| (vec![0f64; n_labels], 0));
            weights[k] += x.weight();
            *count += 1;
        }

        let n_total = node.instances.len();
        let mut best: Option<(f64, &str)> = None;
        for (category, (left, n_left)) in groups.iter() {
            let n_right = n_total - n_left;
            if *n_left < self.min_leaf_instances
                || n_right < self.min_leaf_instances
            {
                continue;
            }
            let right = node.totals.iter()
                .zip(left)
                .map(|(t, l)| t - l)
                .collect::<Vec<_>>();

            let score = self.criterion.split_impurity(left, &right);
            if best.map_or(true, |(s, _)| score < s) {
                best = Some((score, *category));
            }
        }

        best.map(|(score, category)| {
            let rule = Splitter::Category {
                attribute: name.to_string(),
                category: category.to_string(),
            };
            (score, rule)
        })
    }


    /// Regrow every leaf that keeps enough instances.
    fn regrow(&self, node: &mut Node, rng: &mut StdRng) -> Result<()> {
        let grown = match node {
            Node::Branch(branch) => {
                self.regrow(&mut branch.left, rng)?;
                return self.regrow(&mut branch.right, rng);
            },
            Node::Leaf(leaf) => {
                let Some(data) = leaf.data.as_ref() else { return Ok(()); };
                if leaf.depth >= self.max_depth
                    || data.len() < self.min_split_instances
                {
                    return Ok(());
                }
                self.grow(data.clone(), leaf.depth, rng)?
            },
        };

        if matches!(grown, Node::Branch(_)) {
            *node = grown;
        }
        Ok(())
    }
}


/// Per-node statistics shared by the split searches.
struct NodeStats<'a> {
    instances: &'a [Instance],
    label_ix: &'a [usize],
    totals: &'a [f64],
}


impl ModelBuilder for DTreeBuilder {
    type Model = DTreeClassifier;


    fn name(&self) -> &str {
        "Decision Tree"
    }


    fn build_model(&self, sample: &Sample, rng: &mut StdRng)
        -> Result<Self::Model>
    {
        self.check()?;
        if sample.is_empty() {
            return Err(MiniBalanceError::EmptyDataset);
        }

        let root = self.grow(sample.instances().to_vec(), 0, rng)?;
        let tree = DTreeClassifier::new(root, self.id.clone());
        debug!(
            n_instances = sample.len(),
            size = tree.size(),
            mean_depth = tree.mean_depth(),
            "built a decision tree"
        );
        Ok(tree)
    }


    fn updatable(&mut self, updatable: bool) -> &mut Self {
        self.updatable = updatable;
        self
    }


    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }
}


impl UpdatableModelBuilder for DTreeBuilder {
    /// Routes every new instance to its leaf and adds it to the leaf's
    /// label weights.
    /// With `split_nodes`, leaves that keep enough instances are regrown.
    fn update_model(
        &self,
        model: &mut Self::Model,
        sample: &Sample,
        split_nodes: bool,
        rng: &mut StdRng,
    ) -> Result<()>
    {
        self.check()?;
        for instance in sample.iter() {
            model.root.leaf_mut(instance.attributes()).absorb(instance);
        }

        if split_nodes {
            self.regrow(&mut model.root, rng)?;
        }
        debug!(
            n_instances = sample.len(),
            size = model.size(),
            split_nodes,
            "updated a decision tree"
        );
        Ok(())
    }


    fn strip_data(&self, model: &mut Self::Model) -> Result<()> {
        model.root.strip();
        Ok(())
    }
}


impl fmt::Display for DTreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\
            ----------\n\
            # Decision Tree Builder\n\n\
            - Max depth: {}\n\
            - Min. instances per leaf: {}\n\
            - Min. instances to split: {}\n\
            - Splitting criterion: {}\n\
            - Ignore attribute probability: {}\n\
            - Updatable: {}\n\
            ----------\
            ",
            self.max_depth,
            self.min_leaf_instances,
            self.min_split_instances,
            self.criterion,
            self.ignore_attribute_probability,
            self.updatable,
        )
    }
}

