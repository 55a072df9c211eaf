use serde::{Serialize, Deserialize};

use std::ops::Index;
use std::slice::Iter;

use super::instance::Instance;
use super::label::Label;


/// Struct `Sample` holds an ordered batch of labeled instances.
/// A one-pass source (e.g., a streaming reader) is collected into
/// a `Sample` exactly once via `FromIterator`;
/// nothing in this crate re-traverses a lazy source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    instances: Vec<Instance>,
}


impl Sample {
    /// Construct an empty sample.
    #[inline]
    pub fn new() -> Self {
        Self { instances: Vec::new() }
    }


    /// Returns the number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }


    /// Returns `true` if this sample has no instances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }


    /// Returns a slice of the instances.
    #[inline]
    pub fn instances(&self) -> &[Instance] {
        &self.instances[..]
    }


    /// Returns an iterator over the instances.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Instance> {
        self.instances.iter()
    }


    /// Append an instance.
    #[inline]
    pub fn push(&mut self, instance: Instance) {
        self.instances.push(instance);
    }


    /// Returns the labels in sample order.
    pub fn labels(&self) -> Vec<&Label> {
        self.instances.iter()
            .map(|instance| instance.label())
            .collect()
    }


    /// Returns the sum of the instance weights.
    pub fn total_weight(&self) -> f64 {
        self.instances.iter()
            .map(|instance| instance.weight())
            .sum::<f64>()
    }


    /// Returns a new sample consisting of the rows `ix`.
    pub fn subset(&self, ix: &[usize]) -> Self {
        ix.iter()
            .map(|&i| self.instances[i].clone())
            .collect()
    }


    /// Split the sample into a training/test pair.
    /// The rows `ix[start..end]` form the test sample
    /// and all the other rows of `ix` form the training sample.
    pub fn split(&self, ix: &[usize], start: usize, end: usize)
        -> (Self, Self)
    {
        let test = self.subset(&ix[start..end]);
        let train = ix[..start].iter()
            .chain(&ix[end..])
            .map(|&i| self.instances[i].clone())
            .collect();

        (train, test)
    }
}


impl From<Vec<Instance>> for Sample {
    #[inline]
    fn from(instances: Vec<Instance>) -> Self {
        Self { instances }
    }
}


impl FromIterator<Instance> for Sample {
    fn from_iter<T: IntoIterator<Item = Instance>>(iter: T) -> Self {
        Self { instances: iter.into_iter().collect() }
    }
}


impl Extend<Instance> for Sample {
    fn extend<T: IntoIterator<Item = Instance>>(&mut self, iter: T) {
        self.instances.extend(iter);
    }
}


impl IntoIterator for Sample {
    type Item = Instance;
    type IntoIter = std::vec::IntoIter<Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.into_iter()
    }
}


impl<'a> IntoIterator for &'a Sample {
    type Item = &'a Instance;
    type IntoIter = Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}


impl Index<usize> for Sample {
    type Output = Instance;

    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        &self.instances[row]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample_of(n: usize) -> Sample {
        (0..n).map(|i| Instance::from_pairs([("x", i as f64)], i as i64))
            .collect()
    }

    #[test]
    fn split_takes_the_test_rows_from_the_given_range() {
        let sample = sample_of(6);
        let ix = (0..6).collect::<Vec<_>>();

        let (train, test) = sample.split(&ix, 2, 4);

        assert_eq!(test.labels(), vec![&Label::Int(2), &Label::Int(3)]);
        assert_eq!(
            train.labels(),
            vec![&Label::Int(0), &Label::Int(1), &Label::Int(4), &Label::Int(5)]
        );
    }

    #[test]
    fn total_weight_sums_instance_weights() {
        let sample: Sample = vec![
            Instance::from_pairs([("x", 1.0)], 1).with_weight(0.5),
            Instance::from_pairs([("x", 2.0)], -1).with_weight(2.0),
        ].into();

        assert!((sample.total_weight() - 2.5).abs() < 1e-12);
    }
}
