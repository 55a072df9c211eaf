//! Impurity measures for growing decision trees.
use serde::{Serialize, Deserialize};

use std::fmt;


/// Splitting criteria for growing decision tree.
/// * `Criterion::Entropy` minimizes entropic impurity.
/// * `Criterion::Gini` minimizes the Gini index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Entropy function.
    Entropy,
    /// Gini index.
    Gini,
}


impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Entropy => "Entropy",
            Self::Gini => "Gini index",
        };

        write!(f, "{name}")
    }
}


impl Criterion {
    /// Returns the impurity of a node whose label weights are `weights`.
    pub(super) fn impurity(&self, weights: &[f64]) -> f64 {
        let total = weights.iter().sum::<f64>();
        if total <= 0f64 { return 0f64; }

        match self {
            Self::Entropy => {
                weights.iter()
                    .filter(|&&w| w > 0f64)
                    .map(|&w| {
                        let p = w / total;
                        - p * p.ln()
                    })
                    .sum::<f64>()
            },
            Self::Gini => {
                let sq = weights.iter()
                    .map(|&w| (w / total).powi(2))
                    .sum::<f64>();
                1f64 - sq
            },
        }
    }


    /// Returns the weighted impurity of a split into `left` and `right`.
    pub(super) fn split_impurity(&self, left: &[f64], right: &[f64]) -> f64 {
        let lw = left.iter().sum::<f64>();
        let rw = right.iter().sum::<f64>();
        let total = lw + rw;
        if total <= 0f64 { return 0f64; }

        (lw * self.impurity(left) + rw * self.impurity(right)) / total
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_nodes_have_no_impurity() {
        assert_eq!(Criterion::Entropy.impurity(&[3.0, 0.0]), 0.0);
        assert_eq!(Criterion::Gini.impurity(&[0.0, 5.0]), 0.0);
    }

    #[test]
    fn even_nodes_are_most_impure() {
        let entropy = Criterion::Entropy.impurity(&[1.0, 1.0]);
        assert!((entropy - 2f64.ln()).abs() < 1e-12);
        assert!((Criterion::Gini.impurity(&[2.0, 2.0]) - 0.5).abs() < 1e-12);
    }
}
