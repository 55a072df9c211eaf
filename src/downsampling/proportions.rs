use serde::{Serialize, Deserialize};

use std::fmt;
use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use crate::error::{Result, MiniBalanceError};
use crate::sample::{Instance, Label};


/// The proportion of each label in a sample.
/// The proportions sum up to `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationProportions(
    #[serde(with = "crate::sample::label::label_map")]
    BTreeMap<Label, f64>
);


impl ClassificationProportions {
    /// Counts the occurrences of each label in a single pass
    /// and divides them by the number of instances.
    /// Instance weights are not taken into account.
    pub fn analyze<'a, I>(instances: I) -> Result<Self>
        where I: IntoIterator<Item = &'a Instance>
    {
        let mut counts: BTreeMap<Label, u64> = BTreeMap::new();
        let mut total = 0_u64;
        for instance in instances {
            *counts.entry(instance.label().clone()).or_insert(0) += 1;
            total += 1;
        }

        if total == 0 {
            return Err(MiniBalanceError::EmptyDataset);
        }

        let total = total as f64;
        let proportions = counts.into_iter()
            .map(|(label, count)| (label, count as f64 / total))
            .collect();
        Ok(Self(proportions))
    }


    /// Returns the number of distinct labels.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if no label was observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Returns the proportion of `label`.
    #[inline]
    pub fn get(&self, label: &Label) -> Option<f64> {
        self.0.get(label).copied()
    }


    /// Returns an iterator over `(label, proportion)` pairs
    /// in label order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Label, f64> {
        self.0.iter()
    }


    /// Returns the label of the highest proportion.
    /// Ties are broken toward the smallest label.
    pub fn majority(&self) -> Option<(&Label, f64)> {
        self.0.iter()
            .fold(None, |best: Option<(&Label, f64)>, (label, &p)| {
                match best {
                    Some((_, q)) if q >= p => best,
                    _ => Some((label, p)),
                }
            })
    }


    /// Returns the label of the lowest proportion.
    /// Ties are broken toward the largest label,
    /// so that an evenly split sample has distinct
    /// majority and minority labels.
    pub fn minority(&self) -> Option<(&Label, f64)> {
        self.0.iter()
            .fold(None, |best: Option<(&Label, f64)>, (label, &p)| {
                match best {
                    Some((_, q)) if q < p => best,
                    _ => Some((label, p)),
                }
            })
    }
}


impl fmt::Display for ClassificationProportions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, p)) in self.0.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{label}: {p}")?;
        }
        write!(f, "}}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn instances(labels: &[i64]) -> Vec<Instance> {
        labels.iter()
            .map(|&y| Instance::from_pairs([("x", 0.0)], y))
            .collect()
    }

    #[test]
    fn counts_occurrences_not_weights() {
        let mut sample = instances(&[1, -1, -1, -1]);
        sample[0] = sample[0].clone().with_weight(100.0);

        let proportions = ClassificationProportions::analyze(&sample).unwrap();

        assert_eq!(proportions.len(), 2);
        assert_eq!(proportions.get(&Label::from(1)), Some(0.25));
        assert_eq!(proportions.get(&Label::from(-1)), Some(0.75));
        assert_eq!(proportions.majority(), Some((&Label::from(-1), 0.75)));
        assert_eq!(proportions.minority(), Some((&Label::from(1), 0.25)));
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = ClassificationProportions::analyze(&Vec::<Instance>::new());
        assert!(matches!(result, Err(MiniBalanceError::EmptyDataset)));
    }

    #[test]
    fn even_split_has_distinct_majority_and_minority() {
        let sample = instances(&[1, -1, 1, -1]);
        let proportions = ClassificationProportions::analyze(&sample).unwrap();

        let (majority, _) = proportions.majority().unwrap();
        let (minority, _) = proportions.minority().unwrap();
        assert_eq!(majority, &Label::from(-1));
        assert_eq!(minority, &Label::from(1));
    }

    #[test]
    fn integer_labels_survive_json() {
        let sample = instances(&[0, 1, 1, 1]);
        let proportions = ClassificationProportions::analyze(&sample).unwrap();

        let json = serde_json::to_string(&proportions).unwrap();
        let back: ClassificationProportions = serde_json::from_str(&json)
            .unwrap();

        assert_eq!(back, proportions);
        assert_eq!(back.majority(), Some((&Label::from(1), 0.75)));
    }

    proptest! {
        #[test]
        fn two_label_proportions_sum_to_one(
            labels in prop::collection::vec(prop::bool::ANY, 1..500)
        ) {
            let labels = labels.into_iter()
                .map(|b| if b { 1 } else { 0 })
                .collect::<Vec<i64>>();
            let sample = instances(&labels);
            let proportions = ClassificationProportions::analyze(&sample)
                .unwrap();

            let sum = proportions.iter().map(|(_, p)| p).sum::<f64>();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}
