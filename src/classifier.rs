//! Defines the classification capability shared by every trained model.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use crate::sample::{Label, Attributes};


/// A mapping from labels to predicted probabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionMap(
    #[serde(with = "crate::sample::label::label_map")]
    BTreeMap<Label, f64>
);


impl PredictionMap {
    /// Construct a `PredictionMap` by normalizing the given label weights.
    /// Labels of non-positive weight get probability `0`.
    pub fn from_weights<'a, I>(weights: I) -> Self
        where I: IntoIterator<Item = (&'a Label, &'a f64)>
    {
        let weights = weights.into_iter()
            .map(|(label, &w)| (label.clone(), w.max(0f64)))
            .collect::<BTreeMap<_, _>>();
        let total = weights.values().sum::<f64>();

        if total <= 0f64 {
            let n_labels = weights.len() as f64;
            let map = weights.into_keys()
                .map(|label| (label, 1f64 / n_labels))
                .collect();
            return Self(map);
        }

        let map = weights.into_iter()
            .map(|(label, w)| (label, w / total))
            .collect();
        Self(map)
    }


    /// Returns the probability of `label`, or `0` if it is unknown.
    #[inline]
    pub fn get(&self, label: &Label) -> f64 {
        self.0.get(label).copied().unwrap_or(0f64)
    }


    /// Returns the label of the highest probability.
    /// Ties are broken toward the smallest label.
    pub fn most_likely(&self) -> Option<&Label> {
        self.0.iter()
            .fold(None, |best: Option<(&Label, f64)>, (label, &p)| {
                match best {
                    Some((_, q)) if q >= p => best,
                    _ => Some((label, p)),
                }
            })
            .map(|(label, _)| label)
    }


    /// Returns the number of labels.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if no label is predicted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Returns an iterator over `(label, probability)` pairs.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Label, f64> {
        self.0.iter()
    }
}


impl FromIterator<(Label, f64)> for PredictionMap {
    fn from_iter<T: IntoIterator<Item = (Label, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}


impl fmt::Display for PredictionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, p)) in self.0.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{label}: {p:.4}")?;
        }
        write!(f, "}}")
    }
}


/// A trait that defines the behavor of a trained classifier.
/// You need to implement `predict` and `classify`.
pub trait Classifier {
    /// Predicts the probability of each label for the given attributes.
    fn predict(&self, attributes: &Attributes) -> PredictionMap;


    /// Predicts the label of the given attributes.
    fn classify(&self, attributes: &Attributes) -> Label;


    /// Predicts the probability that `attributes` has `label`.
    fn probability_of(&self, attributes: &Attributes, label: &Label) -> f64 {
        self.predict(attributes).get(label)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_weights_normalizes() {
        let weights = BTreeMap::from([
            (Label::from(1), 3.0),
            (Label::from(-1), 1.0),
        ]);
        let prediction = PredictionMap::from_weights(&weights);

        assert!((prediction.get(&Label::from(1)) - 0.75).abs() < 1e-12);
        assert!((prediction.get(&Label::from(-1)) - 0.25).abs() < 1e-12);
        assert_eq!(prediction.get(&Label::from("other")), 0.0);
    }

    #[test]
    fn most_likely_breaks_ties_toward_the_smallest_label() {
        let prediction = [
            (Label::from("b"), 0.5),
            (Label::from("a"), 0.5),
        ].into_iter().collect::<PredictionMap>();

        assert_eq!(prediction.most_likely(), Some(&Label::from("a")));
    }

    #[test]
    fn integer_labels_survive_json() {
        let prediction = [
            (Label::from(0), 0.125),
            (Label::from(1), 0.875),
        ].into_iter().collect::<PredictionMap>();

        let json = serde_json::to_string(&prediction).unwrap();
        let back: PredictionMap = serde_json::from_str(&json).unwrap();

        assert_eq!(back, prediction);
        assert_eq!(back.get(&Label::from(1)), 0.875);
    }
}
